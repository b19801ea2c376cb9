use efistart_abi::Status;
use efistart_boot::{AppConfig, Application, EntryPointUnit, EntryPolicy, LibraryUnit};
use efistart_tests::{journal, recording_fn, ImageHandle, MockFirmware};

recording_fn!(init_a, "init:A", Status::SUCCESS);
recording_fn!(init_b, "init:B", Status::SUCCESS);
recording_fn!(fini_a_fails, "fini:a", Status::DEVICE_ERROR);
recording_fn!(fini_b, "fini:b", Status::SUCCESS);
recording_fn!(entry_ok, "entry:ok", Status::SUCCESS);
recording_fn!(entry_fails, "entry:fails", Status::NOT_FOUND);
recording_fn!(entry_warns, "entry:warns", Status::WARN_WRITE_FAILURE);

const LIBRARIES: [LibraryUnit; 2] = [
    LibraryUnit::new("A", Some(init_a), Some(fini_a_fails)),
    LibraryUnit::new("B", Some(init_b), Some(fini_b)),
];

#[test]
fn last_entry_point_outcome_wins() {
    let entry_points = [
        EntryPointUnit::new("fails", entry_fails),
        EntryPointUnit::new("warns", entry_warns),
    ];
    let app = Application::new(AppConfig::new(), &[], &entry_points);

    let status = app.dispatch(ImageHandle::null(), &MockFirmware::new(0));

    assert_eq!(status, Status::WARN_WRITE_FAILURE);
    assert_eq!(journal(), ["entry:fails", "entry:warns"]);
}

#[test]
fn run_all_keeps_going_after_an_error() {
    let entry_points = [
        EntryPointUnit::new("ok", entry_ok),
        EntryPointUnit::new("fails", entry_fails),
        EntryPointUnit::new("ok", entry_ok),
    ];
    let app = Application::new(AppConfig::new(), &[], &entry_points);

    let status = app.dispatch(ImageHandle::null(), &MockFirmware::new(0));

    assert_eq!(status, Status::SUCCESS);
    assert_eq!(journal(), ["entry:ok", "entry:fails", "entry:ok"]);
}

#[test]
fn stop_on_error_skips_remaining_but_still_tears_down() {
    let entry_points = [
        EntryPointUnit::new("ok", entry_ok),
        EntryPointUnit::new("fails", entry_fails),
        EntryPointUnit::new("ok", entry_ok),
    ];
    let config = AppConfig::new().with_entry_policy(EntryPolicy::StopOnError);
    let libraries = [LibraryUnit::new("B", Some(init_b), Some(fini_b))];
    let app = Application::new(config, &libraries, &entry_points);

    let status = app.dispatch(ImageHandle::null(), &MockFirmware::new(0));

    assert_eq!(status, Status::NOT_FOUND);
    assert_eq!(
        journal(),
        ["init:B", "entry:ok", "entry:fails", "fini:b"]
    );
}

#[test]
fn destructor_failure_never_masks_the_outcome() {
    let entry_points = [EntryPointUnit::new("fails", entry_fails)];
    let app = Application::new(AppConfig::new(), &LIBRARIES, &entry_points);

    let status = app.dispatch(ImageHandle::null(), &MockFirmware::new(0));

    assert_eq!(status, Status::NOT_FOUND);
    assert_eq!(
        journal(),
        ["init:A", "init:B", "entry:fails", "fini:b", "fini:a"]
    );
    assert_eq!(app.teardown_failures(), 1);
}

#[test]
fn destructor_failure_after_success_still_returns_success() {
    let entry_points = [EntryPointUnit::new("ok", entry_ok)];
    let app = Application::new(AppConfig::new(), &LIBRARIES, &entry_points);

    assert_eq!(
        app.dispatch(ImageHandle::null(), &MockFirmware::new(0)),
        Status::SUCCESS
    );
    assert_eq!(app.teardown_failures(), 1);
}
