use clap::Parser;
use dialoguer::Confirm;
use sign_survey::{cli, clipboard, config, error, interactive, logging, photos, storage};
use cli::{Cli, Commands};
use config::Config;
use error::{Result, SurveyCliError};
use sign_survey_common::{
    mailto_link, render_summary, render_violations, validate, ExportOutcome, PhotoSlot,
    SaveOutcome, Strictness, SurveyForm, SurveySession,
};
use storage::{DirectorySink, FileStore};
use std::path::Path;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);
    let mut config = Config::load()?;

    let data_dir = match &cli.data_dir {
        Some(dir) => dir.clone(),
        None => config.data_dir()?,
    };
    let form_path = match (&cli.form, &cli.data_dir) {
        (Some(path), _) => path.clone(),
        (None, Some(dir)) => dir.join(config::FORM_FILE),
        (None, None) => config.form_path()?,
    };
    tracing::debug!(data_dir = %data_dir.display(), form = %form_path.display(), "paths resolved");

    let mut session = SurveySession::new(FileStore::new(&data_dir));

    match cli.command {
        Commands::Fill { photos_dir, fresh } => {
            let start = if fresh {
                new_form(&config)
            } else {
                current_form(&form_path, &mut session, &config)?
            };

            let form = interactive::run_interactive_fill(start, photos_dir.as_deref())?;
            storage::save_form(&form_path, &form)?;
            session.mark_edited();

            println!("\n{}\n", render_summary(&form.snapshot()));
            println!("✔ Form written: {} [{}]", form_path.display(), session.status());
        }

        Commands::Set { field, value } => {
            let form = current_form(&form_path, &mut session, &config)?;
            let form = match storage::set_field(&form, &field, &value) {
                Ok(form) => form,
                Err(e) => {
                    println!("Fields: {}", storage::form_field_names().join(", "));
                    return Err(e);
                }
            };
            storage::save_form(&form_path, &form)?;
            session.mark_edited();
            println!("✔ {} = {:?} [{}]", field, value, session.status());
        }

        Commands::Photo { slot, path } => {
            let mut form = current_form(&form_path, &mut session, &config)?;
            let slot = PhotoSlot::from(slot);
            match path {
                Some(path) => {
                    let file = photos::select_photo(&path)?;
                    println!("✔ {}: {} ({} bytes, {})", slot.label(), file.name, file.size, file.mime_type);
                    *form.photo_mut(slot) = Some(file);
                }
                None => {
                    *form.photo_mut(slot) = None;
                    println!("✔ {}: removed", slot.label());
                }
            }
            storage::save_form(&form_path, &form)?;
            session.mark_edited();
        }

        Commands::Preview => {
            let form = current_form(&form_path, &mut session, &config)?;
            println!("{}", render_summary(&form.snapshot()));
        }

        Commands::Validate { lenient } => {
            let form = current_form(&form_path, &mut session, &config)?;
            let strictness = if lenient { Strictness::Lenient } else { Strictness::Strict };
            let violations = validate(&form.snapshot(), strictness);
            if !violations.is_empty() {
                println!("{}", render_violations(&violations));
                return Err(SurveyCliError::Rejected(violations.len()));
            }
            println!("✔ No problems found ({:?})", strictness);
        }

        Commands::Save => {
            let form = current_form(&form_path, &mut session, &config)?;
            match session.save(&form)? {
                SaveOutcome::Saved(snapshot) => {
                    println!("{}\n", render_summary(&snapshot));
                    println!("✔ {}: {}", session.status(), data_dir.display());
                }
                SaveOutcome::Rejected(violations) => {
                    println!("{}", render_violations(&violations));
                    println!("\n{}", session.status());
                    return Err(SurveyCliError::Rejected(violations.len()));
                }
            }
        }

        Commands::Export { output, draft } => {
            let form = current_form(&form_path, &mut session, &config)?;
            let output_dir = output.unwrap_or_else(|| config.export_dir());
            let mut sink = DirectorySink::new(&output_dir);

            let outcome = if draft {
                let violations = validate(&form.snapshot(), Strictness::Lenient);
                if !violations.is_empty() {
                    println!("⚠ Exporting an incomplete draft\n{}\n", render_violations(&violations));
                }
                session.export_draft(&form, &mut sink)?
            } else {
                session.export(&form, &mut sink)?
            };

            match outcome {
                ExportOutcome::Exported { snapshot, location, .. } => {
                    println!("{}\n", render_summary(&snapshot));
                    println!("✔ Exported: {}", location);
                }
                ExportOutcome::Rejected(violations) => {
                    println!("{}", render_violations(&violations));
                    println!("\n(use --draft to export anyway)");
                    return Err(SurveyCliError::Rejected(violations.len()));
                }
            }
        }

        Commands::Copy => {
            let form = current_form(&form_path, &mut session, &config)?;
            let text = render_summary(&form.snapshot());
            match clipboard::copy_to_clipboard(&text).await {
                clipboard::CopyOutcome::Copied(program) => {
                    println!("✔ Summary copied to clipboard ({})", program);
                }
                clipboard::CopyOutcome::Manual(text) => {
                    println!("Clipboard is not available. Copy the summary below manually:\n");
                    println!("{}", text);
                }
            }
        }

        Commands::Email { to } => {
            let form = current_form(&form_path, &mut session, &config)?;
            let recipient = to.or_else(|| config.email_recipient.clone());
            println!("{}", mailto_link(&form.snapshot(), recipient.as_deref()));
        }

        Commands::Restore => match session.restore() {
            Some((form, snapshot)) => {
                storage::save_form(&form_path, &form)?;
                println!("{}\n", render_summary(&snapshot));
                println!("✔ {}: {}", session.status(), form_path.display());
                if snapshot.photos.wide.is_some() || snapshot.photos.straight.is_some() || snapshot.photos.mount.is_some() {
                    println!("  Photos are not restored; attach them again with `sign-survey photo`.");
                }
            }
            None => println!("No saved survey to restore"),
        },

        Commands::Clear { yes } => {
            if !yes {
                let confirmed = Confirm::new()
                    .with_prompt("Clear this survey?")
                    .default(false)
                    .interact()
                    .map_err(|e| SurveyCliError::Prompt(e.to_string()))?;
                if !confirmed {
                    println!("Cancelled");
                    return Ok(());
                }
            }

            session.clear()?;
            if form_path.exists() {
                std::fs::remove_file(&form_path)?;
            }
            println!("✔ Survey cleared [{}]", session.status());
        }

        Commands::Config { set_surveyor, set_email, set_data_dir, set_export_dir, show } => {
            let mut changed = false;

            if let Some(name) = set_surveyor {
                config.default_surveyor = Some(name);
                changed = true;
            }
            if let Some(email) = set_email {
                config.email_recipient = Some(email);
                changed = true;
            }
            if let Some(dir) = set_data_dir {
                config.data_dir = Some(dir);
                changed = true;
            }
            if let Some(dir) = set_export_dir {
                config.export_dir = Some(dir);
                changed = true;
            }
            if changed {
                config.save()?;
                println!("✔ Config saved: {}", Config::config_path()?.display());
            }

            if show || !changed {
                println!("Config:");
                println!("  Data dir: {}", config.data_dir()?.display());
                println!("  Export dir: {}", config.export_dir().display());
                println!("  Default surveyor: {}", config.default_surveyor.as_deref().unwrap_or("-"));
                println!("  Email recipient: {}", config.email_recipient.as_deref().unwrap_or("-"));
            }
        }
    }

    Ok(())
}

/// 新規フォーム（設定の調査者名を入れておく）
fn new_form(config: &Config) -> SurveyForm {
    SurveyForm {
        surveyor: config.default_surveyor.clone().unwrap_or_default(),
        ..Default::default()
    }
}

/// 編集中フォーム。なければ保存済みレコードから復元し、それもなければ新規
fn current_form<S>(form_path: &Path, session: &mut SurveySession<S>, config: &Config) -> Result<SurveyForm>
where
    S: sign_survey_common::KeyValueStore,
{
    if form_path.exists() {
        return storage::load_form(form_path);
    }
    match session.restore() {
        Some((form, _)) => {
            println!("({})", session.status());
            Ok(form)
        }
        None => Ok(new_form(config)),
    }
}
