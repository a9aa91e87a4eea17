use std::io::IsTerminal;
use std::path::PathBuf;

use crate::{bootstrap::BootStrap, clap_app};
use clap::ArgMatches;
use clipform::{
    controller::{ListFilter, TemplatesController},
    error::*,
};

pub struct App {
    pub matches: ArgMatches,
}

/// Retrieves a required positional argument of a subcommand
fn required_arg<'a>(args: &'a ArgMatches, name: &str) -> Result<&'a str> {
    args.get_one::<String>(name)
        .map(|s| s.as_str())
        .ok_or_else(|| Error::ArgsProcessingError(format!("Missing argument \"{}\"", name)))
}

impl App {
    pub fn new() -> Result<Self> {
        #[cfg(windows)]
        let _ = nu_ansi_term::enable_ansi_support();

        let interactive_output = std::io::stdout().is_terminal();

        Ok(App {
            matches: Self::matches(interactive_output)?,
        })
    }

    pub fn matches(interactive_output: bool) -> Result<ArgMatches> {
        Ok(clap_app::build_app(interactive_output).get_matches())
    }

    /// Start the application, bootstraps the configuration and forwards the request to the controller.
    ///
    /// Without a subcommand, the selected template (or the configured default one) is
    /// applied to the input text.
    ///
    /// # Returns
    /// A `Result` indicating whether the command succeeded.
    pub fn start(&self) -> Result<bool> {
        let bootstrap = BootStrap::new()?;
        let mut controller =
            TemplatesController::new(bootstrap.template_dir()?, bootstrap.get_config())?;

        match self.matches.subcommand() {
            Some(("detect", args)) => {
                if args.get_flag("list") {
                    controller.list_pattern_types()
                } else {
                    controller.detect(required_arg(args, "example")?)
                }
            }
            Some(("templates", tpl_params)) => self.run_templates(&mut controller, tpl_params),
            _ => {
                let template_name = self
                    .matches
                    .get_one::<String>("template")
                    .map(|s| s.as_str())
                    .unwrap_or(&bootstrap.get_config().defaults.template);
                let input = self.matches.get_one::<PathBuf>("input");
                let stdout = std::io::stdout();
                controller.apply(
                    template_name,
                    input.map(|p| p.as_path()),
                    &mut stdout.lock(),
                    !self.matches.get_flag("no-newline"),
                    self.matches.get_flag("show-captures"),
                )
            }
        }
    }

    /// Forwards the templates subcommand to the controller
    fn run_templates(
        &self,
        controller: &mut TemplatesController,
        tpl_params: &ArgMatches,
    ) -> Result<bool> {
        match tpl_params.subcommand() {
            Some(("list", args)) => controller.list(&ListFilter {
                category: args.get_one::<String>("category").cloned(),
                search: args.get_one::<String>("search").cloned(),
                starred: args.get_flag("starred"),
            }),
            Some(("categories", _)) => controller.categories(),
            Some(("show", args)) => controller.show(required_arg(args, "template")?),
            Some(("create", args)) => {
                controller.create(required_arg(args, "template")?, args.get_flag("no-edit"))
            }
            Some(("edit", args)) => controller.edit(required_arg(args, "template")?),
            Some(("remove", args)) => controller.remove(required_arg(args, "template")?),
            Some(("duplicate", args)) => controller.duplicate(required_arg(args, "template")?),
            Some(("star", args)) => controller.star(required_arg(args, "template")?),
            Some(("recent", args)) => controller.recent(args.get_flag("clear")),
            Some(("reset", args)) => {
                if args.get_flag("force") {
                    controller.reset()
                } else {
                    clipform::warn!(
                        "This removes every file of the templates directory, run again with --force"
                    );
                    Ok(false)
                }
            }
            Some(("import", args)) => {
                let file = args.get_one::<PathBuf>("file").ok_or_else(|| {
                    Error::ArgsProcessingError("Missing argument \"file\"".to_string())
                })?;
                controller.import(file)
            }
            Some((other, _)) => Err(Error::CommandError(format!(
                "Unknown templates subcommand \"{}\"",
                other
            ))),
            None => Err(Error::CommandError(
                "Missing templates subcommand".to_string(),
            )),
        }
    }
}
