use efistart_abi::Status;
use efistart_boot::{
    AppConfig, Application, EntryPointUnit, InvocationContext, LibraryUnit, TerminationState,
};
use efistart_tests::{
    journal, record, recording_fn, run_to_exit, ImageHandle, MockFirmware, Outcome,
};

recording_fn!(init_a, "init:A", Status::SUCCESS);
recording_fn!(init_b, "init:B", Status::SUCCESS);
recording_fn!(fini_a, "fini:a", Status::SUCCESS);
recording_fn!(fini_b, "fini:b", Status::SUCCESS);
recording_fn!(entry_one, "entry:E1", Status::SUCCESS);
recording_fn!(entry_three, "entry:E3", Status::SUCCESS);
recording_fn!(entry_warns, "entry:warns", Status::WARN_STALE_DATA);

fn entry_two_exits(ctx: &InvocationContext<'_>) -> Status {
    record("entry:E2");
    ctx.exit(Status::ABORTED)
}

fn init_exits(ctx: &InvocationContext<'_>) -> Status {
    record("init:X");
    ctx.exit(Status::NOT_READY)
}

fn fini_exits(ctx: &InvocationContext<'_>) -> Status {
    record("fini:x");
    ctx.exit(Status::DEVICE_ERROR)
}

fn libraries() -> [LibraryUnit; 2] {
    [
        LibraryUnit::new("A", Some(init_a), Some(fini_a)),
        LibraryUnit::new("B", Some(init_b), Some(fini_b)),
    ]
}

#[test]
fn exit_from_entry_point_tears_down_once_and_skips_the_rest() {
    let libraries = libraries();
    let entry_points = [
        EntryPointUnit::new("E1", entry_one),
        EntryPointUnit::new("E2", entry_two_exits),
        EntryPointUnit::new("E3", entry_three),
    ];
    let app = Application::new(AppConfig::new(), &libraries, &entry_points);
    let firmware = MockFirmware::new(0);

    let outcome = run_to_exit(|| app.dispatch(ImageHandle::null(), &firmware));

    assert_eq!(outcome, Outcome::Exited(Status::ABORTED));
    assert_eq!(
        journal(),
        [
            "init:A",
            "init:B",
            "entry:E1",
            "entry:E2",
            "fini:b",
            "fini:a",
            "firmware:exit"
        ]
    );
    assert_eq!(firmware.exits(), 1);
    assert_eq!(app.state(), TerminationState::DestructorsRun);
}

#[test]
fn exit_from_constructor_tears_down_earlier_units() {
    let libraries = [
        LibraryUnit::new("A", Some(init_a), Some(fini_a)),
        LibraryUnit::new("X", Some(init_exits), Some(fini_b)),
        LibraryUnit::new("B", Some(init_b), Some(fini_b)),
    ];
    let entry_points = [EntryPointUnit::new("E1", entry_one)];
    let app = Application::new(AppConfig::new(), &libraries, &entry_points);

    let outcome = run_to_exit(|| app.dispatch(ImageHandle::null(), &MockFirmware::new(0)));

    assert_eq!(outcome, Outcome::Exited(Status::NOT_READY));
    assert_eq!(journal(), ["init:A", "init:X", "fini:a", "firmware:exit"]);
    assert_eq!(app.state(), TerminationState::DestructorsRun);
}

#[test]
fn exit_from_a_destructor_keeps_the_dispatch_outcome() {
    let libraries = [
        LibraryUnit::new("A", Some(init_a), Some(fini_a)),
        LibraryUnit::new("X", None, Some(fini_exits)),
        LibraryUnit::new("B", Some(init_b), Some(fini_b)),
    ];
    let entry_points = [EntryPointUnit::new("warns", entry_warns)];
    let app = Application::new(AppConfig::new(), &libraries, &entry_points);
    let firmware = MockFirmware::new(0);

    let outcome = run_to_exit(|| app.dispatch(ImageHandle::null(), &firmware));

    assert_eq!(outcome, Outcome::Exited(Status::WARN_STALE_DATA));
    assert_eq!(
        journal(),
        [
            "init:A",
            "init:B",
            "entry:warns",
            "fini:b",
            "fini:x",
            "firmware:exit"
        ]
    );
    assert_eq!(firmware.exits(), 1);
    assert_eq!(app.state(), TerminationState::DestructorsRun);
}

#[test]
fn exit_during_exit_teardown_keeps_the_first_status() {
    let libraries = [
        LibraryUnit::new("A", Some(init_a), Some(fini_a)),
        LibraryUnit::new("X", None, Some(fini_exits)),
    ];
    let entry_points = [
        EntryPointUnit::new("E2", entry_two_exits),
        EntryPointUnit::new("E3", entry_three),
    ];
    let app = Application::new(AppConfig::new(), &libraries, &entry_points);
    let firmware = MockFirmware::new(0);

    let outcome = run_to_exit(|| app.dispatch(ImageHandle::null(), &firmware));

    assert_eq!(outcome, Outcome::Exited(Status::ABORTED));
    assert_eq!(journal(), ["init:A", "entry:E2", "fini:x", "firmware:exit"]);
    assert_eq!(firmware.exits(), 1);
}

#[test]
fn exit_status_replaces_any_return_code() {
    let libraries = libraries();
    let entry_points = [EntryPointUnit::new("E2", entry_two_exits)];
    let app = Application::new(AppConfig::new(), &libraries, &entry_points);

    let outcome = run_to_exit(|| app.dispatch(ImageHandle::null(), &MockFirmware::new(0)));

    assert_eq!(outcome, Outcome::Exited(Status::ABORTED));
    assert!(!journal().contains(&"entry:E3"));
}

#[test]
fn second_dispatch_is_refused() {
    let libraries = libraries();
    let entry_points = [EntryPointUnit::new("E1", entry_one)];
    let app = Application::new(AppConfig::new(), &libraries, &entry_points);
    let firmware = MockFirmware::new(0);

    assert_eq!(app.dispatch(ImageHandle::null(), &firmware), Status::SUCCESS);
    let first_run = journal();

    assert_eq!(
        app.dispatch(ImageHandle::null(), &firmware),
        Status::ALREADY_STARTED
    );
    assert_eq!(journal(), first_run);
    assert_eq!(app.state(), TerminationState::Returned);
}

#[test]
fn second_dispatch_after_exit_is_refused() {
    let libraries = libraries();
    let entry_points = [EntryPointUnit::new("E2", entry_two_exits)];
    let app = Application::new(AppConfig::new(), &libraries, &entry_points);
    let firmware = MockFirmware::new(0);

    let _ = run_to_exit(|| app.dispatch(ImageHandle::null(), &firmware));
    let after_exit = journal();

    assert_eq!(
        app.dispatch(ImageHandle::null(), &firmware),
        Status::ALREADY_STARTED
    );
    assert_eq!(journal(), after_exit);
    assert_eq!(firmware.exits(), 1);
}
