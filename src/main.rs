use clap::Parser;
use color_forms::{cli, config, error, logging, runner};
use cli::{Cli, Commands};
use config::Config;
use error::Result;

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::load()?;
    logging::initialize(&config.log_level, cli.verbose);

    match cli.command {
        Commands::Variants { values } => {
            let outcome = runner::run_variants(values, &config)?;
            runner::finish(outcome)?;
        }

        Commands::Colors { entries } => {
            let outcome = runner::run_colors(&entries, &config)?;
            runner::finish(outcome)?;
        }

        Commands::Check { input, form } => {
            if !runner::run_check(&input, form)? {
                return Err(error::AppError::InvalidForm(input.display().to_string()));
            }
        }

        Commands::Edit { form, input } => {
            let form = form.unwrap_or(config.default_form);
            runner::run_edit(form, input.as_deref(), &config)?;
        }

        Commands::Config { set_log_level, set_submit_dir, show } => {
            let mut config = config;
            let mut changed = false;

            if let Some(level) = set_log_level {
                config.set_log_level(&level)?;
                println!("✔ ログレベルを設定しました: {}", config.log_level);
                changed = true;
            }

            if let Some(dir) = set_submit_dir {
                config.set_submit_dir(dir);
                println!("✔ 送信値の書き出し先を設定しました");
                changed = true;
            }

            if changed {
                config.save()?;
            }

            if show || !changed {
                runner::show_config(&config);
            }
        }
    }

    Ok(())
}
