use clap::{Arg, ArgAction, Command};

pub fn build_cli() -> Command {
    Command::new("areadesk")
        .version(areadesk_core::core_version())
        .about("Browse and create areas and folders on a memo server")
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .help("Path to the TOML config file")
                .default_value("areadesk.toml")
                .global(true),
        )
        .arg(
            Arg::new("base-url")
                .long("base-url")
                .help("Server base URL (overrides config and environment)")
                .global(true),
        )
        .arg(
            Arg::new("log-dir")
                .long("log-dir")
                .help("Absolute directory for rolling log files")
                .global(true),
        )
        .arg(
            Arg::new("offline")
                .long("offline")
                .help("Use an empty in-process backend instead of the server")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new("tree").about("Show areas with their folders").arg(
                Arg::new("expand-all")
                    .long("expand-all")
                    .short('e')
                    .help("Expand every area")
                    .action(ArgAction::SetTrue),
            ),
        )
        .subcommand(Command::new("areas").about("List areas"))
        .subcommand(
            Command::new("folders").about("List folders").arg(
                Arg::new("area")
                    .long("area")
                    .short('a')
                    .help("Only folders of this area (resource name)"),
            ),
        )
        .subcommand(
            Command::new("create-area")
                .about("Create an area")
                .arg(
                    Arg::new("name")
                        .long("name")
                        .short('n')
                        .help("Display name")
                        .required(true),
                )
                .arg(
                    Arg::new("description")
                        .long("description")
                        .short('d')
                        .help("Optional description"),
                ),
        )
        .subcommand(
            Command::new("create-folder")
                .about("Create a folder inside an area")
                .arg(
                    Arg::new("area")
                        .long("area")
                        .short('a')
                        .help("Owning area (resource name)")
                        .required(true),
                )
                .arg(
                    Arg::new("name")
                        .long("name")
                        .short('n')
                        .help("Display name")
                        .required(true),
                )
                .arg(
                    Arg::new("description")
                        .long("description")
                        .short('d')
                        .help("Optional description"),
                ),
        )
        .subcommand(
            Command::new("select")
                .about("Resolve an area/folder selection against the server")
                .arg(
                    Arg::new("area")
                        .long("area")
                        .short('a')
                        .help("Area to select (resource name)"),
                )
                .arg(
                    Arg::new("folder")
                        .long("folder")
                        .short('f')
                        .help("Folder to select; drives the area when known"),
                ),
        )
}
