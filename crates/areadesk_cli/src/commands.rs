use crate::render;
use areadesk_core::{
    FolderSelector, HierarchyGateway, ProjectExplorer, Selection, SelectionEvent, SubmitOutcome,
};
use clap::ArgMatches;
use log::{info, warn};
use std::error::Error;

type CommandResult = Result<(), Box<dyn Error>>;

pub fn run_command<G: HierarchyGateway>(gateway: G, matches: &ArgMatches) -> CommandResult {
    match matches.subcommand() {
        Some(("tree", sub)) => handle_tree(gateway, sub.get_flag("expand-all")),
        Some(("areas", _)) => handle_areas(gateway),
        Some(("folders", sub)) => handle_folders(gateway, sub.get_one::<String>("area")),
        Some(("create-area", sub)) => handle_create_area(gateway, sub),
        Some(("create-folder", sub)) => handle_create_folder(gateway, sub),
        Some(("select", sub)) => handle_select(gateway, sub),
        _ => Err("unknown command".into()),
    }
}

fn mounted_explorer<G: HierarchyGateway>(gateway: G) -> ProjectExplorer<G> {
    let mut explorer = ProjectExplorer::new(gateway);
    explorer.mount();
    print_notices(&mut explorer);
    explorer
}

fn handle_tree<G: HierarchyGateway>(gateway: G, expand_all: bool) -> CommandResult {
    let mut explorer = mounted_explorer(gateway);
    if expand_all {
        let names: Vec<String> = explorer.areas().iter().map(|a| a.name.clone()).collect();
        for name in names {
            explorer.toggle_area(&name);
        }
    }
    print!("{}", render::tree(&explorer.tree()));
    Ok(())
}

fn handle_areas<G: HierarchyGateway>(gateway: G) -> CommandResult {
    let explorer = mounted_explorer(gateway);
    for area in explorer.areas() {
        println!("{}", render::area_label(area));
    }
    Ok(())
}

fn handle_folders<G: HierarchyGateway>(gateway: G, area: Option<&String>) -> CommandResult {
    let explorer = mounted_explorer(gateway);
    let folders = match area {
        Some(area) => explorer.folders_for_area(area),
        None => explorer.folders().iter().collect(),
    };
    for folder in folders {
        println!("{}  [{}]", render::folder_label(folder), folder.area);
    }
    Ok(())
}

fn handle_create_area<G: HierarchyGateway>(gateway: G, matches: &ArgMatches) -> CommandResult {
    let mut explorer = mounted_explorer(gateway);
    explorer.open_create_area();
    let dialog = explorer.area_dialog_mut();
    if let Some(name) = matches.get_one::<String>("name") {
        dialog.set_display_name(name.as_str());
    }
    if let Some(description) = matches.get_one::<String>("description") {
        dialog.set_description(description.as_str());
    }

    let outcome = explorer.submit_create_area();
    print_notices(&mut explorer);
    finish(outcome, "area")
}

fn handle_create_folder<G: HierarchyGateway>(gateway: G, matches: &ArgMatches) -> CommandResult {
    let mut explorer = mounted_explorer(gateway);
    explorer.open_create_folder(matches.get_one::<String>("area").map(String::as_str));
    let dialog = explorer.folder_dialog_mut();
    if let Some(name) = matches.get_one::<String>("name") {
        dialog.set_display_name(name.as_str());
    }
    if let Some(description) = matches.get_one::<String>("description") {
        dialog.set_description(description.as_str());
    }

    let outcome = explorer.submit_create_folder();
    print_notices(&mut explorer);
    finish(outcome, "folder")
}

fn handle_select<G: HierarchyGateway>(gateway: G, matches: &ArgMatches) -> CommandResult {
    let mut selector = FolderSelector::new(gateway, Selection::default()).with_listener(
        |event| match event {
            SelectionEvent::AreaChanged(area) => {
                println!("area -> {}", area.as_deref().unwrap_or("none"))
            }
            SelectionEvent::FolderChanged(folder) => {
                println!("folder -> {}", folder.as_deref().unwrap_or("none"))
            }
        },
    );
    selector.mount();
    for notice in selector.take_notices() {
        eprintln!("{}", render::notice(&notice));
    }

    if let Some(area) = matches.get_one::<String>("area") {
        if !selector.select_area(Some(area.as_str())) {
            warn!("event=cli_select module=cli status=ignored area={area}");
            return Err(format!("area is not available: {area}").into());
        }
    }
    if let Some(folder) = matches.get_one::<String>("folder") {
        if !selector.select_folder(Some(folder.as_str())) {
            warn!("event=cli_select module=cli status=ignored folder={folder}");
            return Err(format!("folder is not available: {folder}").into());
        }
    }

    if selector.shows_folder_picker() {
        println!("folders in area:");
        for folder in selector.folder_options() {
            println!("  {}", render::folder_label(folder));
        }
    }
    Ok(())
}

fn print_notices<G: HierarchyGateway>(explorer: &mut ProjectExplorer<G>) {
    for notice in explorer.take_notices() {
        eprintln!("{}", render::notice(&notice));
    }
}

fn finish(outcome: SubmitOutcome, entity: &str) -> CommandResult {
    match outcome {
        SubmitOutcome::Created => {
            info!("event=cli_create module=cli status=ok entity={entity}");
            Ok(())
        }
        SubmitOutcome::Rejected(err) => Err(format!("{entity} not created: {err}").into()),
        SubmitOutcome::Failed(err) => Err(format!("{entity} not created: {err}").into()),
    }
}
