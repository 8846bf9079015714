use areadesk_core::{Area, ChildView, Folder, Notice, NoticeLevel, TreeView};

const NO_AREAS: &str = "No areas yet. Create your first area to get started.";
const NO_FOLDERS: &str = "No folders";

/// Renders the explorer tree as indented text.
pub fn tree(view: &TreeView<'_>) -> String {
    let nodes = match view {
        TreeView::Empty => return format!("{NO_AREAS}\n"),
        TreeView::Areas(nodes) => nodes,
    };

    let mut out = String::new();
    for node in nodes {
        let marker = if node.expanded { 'v' } else { '>' };
        out.push_str(&format!("{marker} {}\n", area_label(node.area)));
        match &node.children {
            ChildView::Collapsed => {}
            ChildView::NoFolders => out.push_str(&format!("    {NO_FOLDERS}\n")),
            ChildView::Folders(folders) => {
                for folder in folders {
                    out.push_str(&format!("    - {}\n", folder_label(folder)));
                }
            }
        }
    }
    out
}

pub fn area_label(area: &Area) -> String {
    format!("{} ({})", display_or_name(&area.display_name, &area.name), area.name)
}

pub fn folder_label(folder: &Folder) -> String {
    format!(
        "{} ({})",
        display_or_name(&folder.display_name, &folder.name),
        folder.name
    )
}

pub fn notice(notice: &Notice) -> String {
    let tag = match notice.level {
        NoticeLevel::Success => "ok",
        NoticeLevel::Warning => "warning",
        NoticeLevel::Error => "error",
    };
    format!("{tag}: {}", notice.message)
}

fn display_or_name<'a>(display_name: &'a str, name: &'a str) -> &'a str {
    if display_name.trim().is_empty() {
        name
    } else {
        display_name
    }
}
