use efistart_abi::Status;
use efistart_boot::{AppConfig, Application, EntryPointUnit, LibraryUnit, TerminationState};
use efistart_tests::{journal, recording_fn, ImageHandle, MockFirmware};

recording_fn!(init_a, "init:A", Status::SUCCESS);
recording_fn!(init_b, "init:B", Status::SUCCESS);
recording_fn!(init_c, "init:C", Status::SUCCESS);
recording_fn!(fini_a, "fini:a", Status::SUCCESS);
recording_fn!(fini_b, "fini:b", Status::SUCCESS);
recording_fn!(fini_c, "fini:c", Status::SUCCESS);
recording_fn!(app_main, "entry:main", Status::SUCCESS);

#[test]
fn destructors_mirror_constructors() {
    let libraries = [
        LibraryUnit::new("A", Some(init_a), Some(fini_a)),
        LibraryUnit::new("B", Some(init_b), Some(fini_b)),
        LibraryUnit::new("C", Some(init_c), Some(fini_c)),
    ];
    let entry_points = [EntryPointUnit::new("main", app_main)];
    let app = Application::new(AppConfig::new(), &libraries, &entry_points);

    let status = app.dispatch(ImageHandle::null(), &MockFirmware::new(0));

    assert_eq!(status, Status::SUCCESS);
    assert_eq!(
        journal(),
        [
            "init:A",
            "init:B",
            "init:C",
            "entry:main",
            "fini:c",
            "fini:b",
            "fini:a"
        ]
    );
    assert_eq!(app.initialized_units(), 3);
    assert_eq!(app.state(), TerminationState::Returned);
}

#[test]
fn units_without_hooks_keep_their_chain_position() {
    let libraries = [
        LibraryUnit::new("A", Some(init_a), None),
        LibraryUnit::new("B", None, Some(fini_b)),
        LibraryUnit::new("C", None, None),
        LibraryUnit::new("D", Some(init_c), Some(fini_c)),
    ];
    let app = Application::new(AppConfig::new(), &libraries, &[]);

    let status = app.dispatch(ImageHandle::null(), &MockFirmware::new(0));

    assert_eq!(status, Status::SUCCESS);
    assert_eq!(journal(), ["init:A", "init:C", "fini:c", "fini:b"]);
    assert_eq!(app.initialized_units(), 4);
}

#[test]
fn supplied_order_is_never_rearranged() {
    let libraries = [
        LibraryUnit::new("C", Some(init_c), Some(fini_c)),
        LibraryUnit::new("A", Some(init_a), Some(fini_a)),
        LibraryUnit::new("B", Some(init_b), Some(fini_b)),
    ];
    let app = Application::new(AppConfig::new(), &libraries, &[]);

    app.dispatch(ImageHandle::null(), &MockFirmware::new(0));

    assert_eq!(
        journal(),
        ["init:C", "init:A", "init:B", "fini:b", "fini:a", "fini:c"]
    );
}

#[test]
fn empty_application_succeeds() {
    let app = Application::new(AppConfig::new(), &[], &[]);
    assert_eq!(
        app.dispatch(ImageHandle::null(), &MockFirmware::new(0)),
        Status::SUCCESS
    );
    assert!(journal().is_empty());
    assert_eq!(app.state(), TerminationState::Returned);
}
