mod bootstrap;
mod render;

use anyhow::{bail, Context, Result};
use ledger_core::settings::Settings;
use ledger_data::reader::write_csv;
use ledger_data::template::write_template;
use ledger_runtime::data_manager::LedgerManager;

fn main() -> Result<()> {
    let settings = Settings::load();

    bootstrap::setup_logging(&settings.log_level, settings.log_file.as_ref())?;

    tracing::info!("Expense Dashboard v{} starting", env!("CARGO_PKG_VERSION"));

    if let Some(path) = &settings.write_template {
        write_template(path)
            .with_context(|| format!("writing template to {}", path.display()))?;
        println!("Template written to {}", path.display());
        return Ok(());
    }

    let mut manager = LedgerManager::new();

    if let Some(file) = &settings.file {
        tracing::info!("Loading {}", file.display());
        manager.load(file);
    }

    if !manager.has_ledger() {
        match bootstrap::discover_default_file(&settings.default_file) {
            Some(default) => {
                if settings.file.is_some() {
                    tracing::warn!("Falling back to default ledger {}", default.display());
                }
                manager.load(&default);
            }
            None => tracing::warn!(
                "Default ledger {} not found",
                settings.default_file.display()
            ),
        }
    }

    let Some(ledger) = manager.active() else {
        match manager.last_error() {
            Some(error) => bail!("no usable ledger: {error}"),
            None => bail!(
                "no ledger to load; pass --file or place {} in the working directory",
                settings.default_file.display()
            ),
        }
    };

    if let Some(path) = &settings.export_normalized {
        write_csv(&ledger.table.to_raw_table(), path)
            .with_context(|| format!("exporting normalized ledger to {}", path.display()))?;
        tracing::info!("Normalized ledger written to {}", path.display());
    }

    let analysis = manager.analyze(&settings.selection())?;

    if settings.wants_json() {
        println!("{}", render::render_json(&analysis)?);
    } else {
        print!("{}", render::render_text(&analysis, &settings.currency));
    }

    Ok(())
}
