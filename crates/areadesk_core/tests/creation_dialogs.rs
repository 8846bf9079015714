mod common;

use areadesk_core::{
    AreaDialog, CancellationToken, DialogError, FolderDialog, HierarchyGateway, SubmitOutcome,
};
use common::{area, RecordingGateway};

#[test]
fn whitespace_area_name_never_invokes_gateway() {
    let gateway = RecordingGateway::new();
    let cancel = CancellationToken::new();

    for blank in ["", "   ", "\t\n"] {
        let mut dialog = AreaDialog::new();
        dialog.open();
        dialog.set_display_name(blank);
        dialog.set_description("ignored");

        let outcome = dialog.submit(|draft| gateway.create_area(draft, &cancel));
        assert_eq!(
            outcome,
            SubmitOutcome::Rejected(DialogError::MissingDisplayName)
        );
        assert!(dialog.is_open());
        assert!(!dialog.is_busy());
    }
    assert_eq!(RecordingGateway::calls(&gateway.create_area_calls), 0);
}

#[test]
fn empty_folder_name_with_area_is_blocked() {
    let gateway = RecordingGateway::seeded(vec![area("areas/1", "Home")], Vec::new());
    let cancel = CancellationToken::new();
    let offered = gateway.list_areas(&cancel).unwrap();

    let mut dialog = FolderDialog::new();
    dialog.open(Some("areas/1"));
    dialog.set_display_name("");

    let outcome = dialog.submit(&offered, |draft| gateway.create_folder(draft, &cancel));
    assert_eq!(
        outcome,
        SubmitOutcome::Rejected(DialogError::MissingDisplayName)
    );
    assert_eq!(RecordingGateway::calls(&gateway.create_folder_calls), 0);
}

#[test]
fn submitted_draft_carries_trimmed_fields() {
    let gateway = RecordingGateway::seeded(vec![area("areas/1", "Home")], Vec::new());
    let cancel = CancellationToken::new();
    let offered = gateway.list_areas(&cancel).unwrap();

    let mut dialog = FolderDialog::new();
    dialog.open(Some("areas/1"));
    dialog.set_display_name("  Equipment  ");
    dialog.set_description("  racks and cables ");

    let outcome = dialog.submit(&offered, |draft| {
        assert_eq!(draft.display_name(), "Equipment");
        assert_eq!(draft.description(), "racks and cables");
        assert_eq!(draft.area(), "areas/1");
        gateway.create_folder(draft, &cancel)
    });
    assert_eq!(outcome, SubmitOutcome::Created);

    let folders = gateway.list_folders(&cancel).unwrap();
    assert_eq!(folders.len(), 1);
    assert_eq!(folders[0].display_name, "Equipment");
}

#[test]
fn two_phase_submit_blocks_duplicates_until_finished() {
    let mut dialog = FolderDialog::new();
    dialog.open(Some("areas/1"));
    dialog.set_display_name("Equipment");
    let offered = vec![area("areas/1", "Home")];

    let draft = dialog.begin_submit(&offered).unwrap();
    assert_eq!(draft.area(), "areas/1");
    assert_eq!(dialog.begin_submit(&offered).unwrap_err(), DialogError::Busy);
    assert!(!dialog.close());

    dialog.finish(false);
    assert!(dialog.is_open());
    assert_eq!(dialog.display_name(), "Equipment");
    assert!(dialog.close());
    assert!(!dialog.is_open());
}
