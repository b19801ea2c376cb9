fn main() {
    // Firmware loads the image at `_ModuleEntryPoint`; the target default is `efi_main`.
    if std::env::var("CARGO_CFG_TARGET_OS").as_deref() == Ok("uefi") {
        println!("cargo:rustc-link-arg-bins=/entry:_ModuleEntryPoint");
    }
}
