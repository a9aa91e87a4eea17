use std::path::PathBuf;

use clap::{
    arg,
    builder::{styling::AnsiColor, Styles},
    crate_description, crate_name, crate_version, value_parser, Arg, ArgAction, ColorChoice,
    Command,
};

fn env_no_color() -> bool {
    std::env::var_os("NO_COLOR").is_some_and(|x| !x.is_empty())
}

// Builds the application command line interface defining the commands, subcommands
// and arguments
pub fn build_app(interactive_output: bool) -> Command {
    let color_when = if interactive_output && !env_no_color() {
        ColorChoice::Auto
    } else {
        ColorChoice::Never
    };

    let styles = Styles::styled()
        .header(AnsiColor::Yellow.on_default())
        .usage(AnsiColor::Green.on_default())
        .literal(AnsiColor::Green.on_default())
        .placeholder(AnsiColor::Green.on_default());

    Command::new(crate_name!())
    .styles(styles)
    .version(crate_version!())
    .about(crate_description!())
    .color(color_when)
    .arg(
        arg!(-t --template <VALUE> "Template to apply to the text")
        .long_help(
            "Template whose transformations are applied to the input text. Matches a \
                    template id or name, either built-in or inside the templates directory \
                    ($CLIPFORM_TEMPLATES_DIR). Defaults to the template set in the configuration.",
        ),
    )
    .arg(
        arg!(-i --input <FILE> "Reads the text from a file instead of stdin")
        .value_parser(value_parser!(PathBuf)),
    )
    .arg(
        arg!(-n --"no-newline" "Supress new line after the transformed text.")
        .long_help("Prevents writing a trailing new line after the transformed text."),
    )
    .arg(
        arg!(--"show-captures" "Print the captured values to stderr.")
        .long_help("Reports every value captured while applying the template on stderr, once the text is written."),
    )
    .subcommand(build_detect_command())
    .subcommand(configure_subcommands())
}

/// Builds the detect command
fn build_detect_command() -> Command {
    Command::new("detect")
    .about("Detects the pattern matching an example.")
    .long_about(
        "Finds the kind of text the example belongs to (timestamp, date, uuid, email, ...) \
                and prints the pattern used to find it in a larger text.",
    )
    .arg(arg!([example] "The example text to detect"))
    .arg(arg!(-l --list "List the known pattern types"))
    .arg_required_else_help(true)
}

/// Configure the templates subcommands
fn configure_subcommands() -> Command {
    Command::new("templates")
    .about("Manage the templates")
    .arg_required_else_help(true)
    .subcommand(build_list_command())
    .subcommand(
        Command::new("categories")
        .about("Lists the categories of the available templates."),
    )
    .subcommand(
        Command::new("show")
        .arg(arg!(<template> "The name of template to display"))
        .about("Displays the contents of the selected template."),
    )
    .subcommand(
        Command::new("create")
        .alias("new")
        .arg(arg!(<template> "The name of template to create"))
        .arg(arg!(-n --"no-edit" "Skip opening the editor after creation"))
        .about("Creates a new template with the given name.")
        .long_about(
            "Creates the given template in \
                    the templates directory (default: the templates folder inside configuration directory).\
                    The template will be created using the default \
                    template structure.",
        ),
    )
    .subcommand(
        Command::new("edit")
        .arg(arg!(<template> "The name of template to edit"))
        .about("Opens the selected template.")
        .long_about(
            "Opens the selected template in the platform's default text editor. \
                    Built-in templates are first copied to the templates directory.",
        ),
    )
    .subcommand(
        Command::new("remove")
        .alias("rm")
        .arg(Arg::new("template")
        .required(true)
        .action(ArgAction::Set)
        .help("The name of template to remove")
        .index(1))
        .about("Removes the template with the given name.")
        .long_about(
            "Removes the given template in \
                    the templates directory (default: the templates folder inside configuration directory).",
        ),
    )
    .subcommand(
        Command::new("duplicate")
        .alias("cp")
        .arg(arg!(<template> "The name of template to duplicate"))
        .about("Saves a copy of the template under a new id."),
    )
    .subcommand(
        Command::new("star")
        .arg(arg!(<template> "The name of template to star or unstar"))
        .about("Toggles the starred flag of the template."),
    )
    .subcommand(
        Command::new("recent")
        .arg(arg!(--clear "Forget the recently used templates"))
        .about("Lists the recently used templates, newest first."),
    )
    .subcommand(
        Command::new("reset")
        .arg(arg!(-f --force "Confirms the removal of the template files"))
        .about("Restores the default templates.")
        .long_about(
            "Removes every template file of the templates directory, restoring \
                    the built-in templates. Requires --force.",
        ),
    )
    .subcommand(
        Command::new("import")
        .arg(arg!(<file> "The JSON export holding the templates").value_parser(value_parser!(PathBuf)))
        .about("Imports the templates of a JSON export into the templates directory."),
    )
}

/// Builds the list command
///
/// # Returns
/// A `Command` object representing the list command.
fn build_list_command() -> Command {
    Command::new("list")
    .alias("ls")
    .about("List the available templates.")
    .long_about(
        "Displays the built-in templates along with those found in \
            the templates directory (default: the templates folder inside configuration directory).",
    )
    .arg(arg!(-c --category <VALUE> "Only list the templates of the category"))
    .arg(arg!(-s --search <VALUE> "Only list the templates matching the query"))
    .arg(arg!(--starred "Only list the starred templates"))
}
