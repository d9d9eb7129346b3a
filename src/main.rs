//! formula - replay key symbols against an empty formula and print the result

use anyhow::{Context, Result};
use clap::Parser;

use formula_editor::cli::CliArgs;
use formula_editor::config::EditorConfig;
use formula_editor::keys::KeyLayout;
use formula_editor::model::AppModel;
use formula_editor::render::source_markup;
use formula_editor::runtime::msg_for_symbol;
use formula_editor::theme::load_palette;
use formula_editor::translate::translate;
use formula_editor::update::update;

fn main() -> Result<()> {
    formula_editor::tracing::init();

    let args = CliArgs::parse();
    let startup = args.into_config(EditorConfig::load());

    if let Some(config) = &startup.persist {
        config
            .save()
            .map_err(anyhow::Error::msg)
            .context("Failed to save configuration")?;
        tracing::info!("Saved configuration");
    }

    let palette = load_palette(&startup.config.theme)
        .map_err(anyhow::Error::msg)
        .with_context(|| format!("Failed to load theme '{}'", startup.config.theme))?;
    let keys = KeyLayout::load(startup.config.key_layout.as_deref());
    let mut model = AppModel::new(startup.config, palette, keys);

    for symbol in &startup.symbols {
        let msg = msg_for_symbol(&model.keys, symbol);
        // No evaluator attached; commands are dropped
        let _ = update(&mut model, msg);
    }

    if !startup.plain {
        println!("{}", model.render());
    }
    println!("{}", source_markup(&model.editor.tokens));
    match translate(&model.editor.tokens, model.config.angle_mode) {
        Ok(translation) => println!("{}", translation.expression),
        Err(e) => println!("not evaluable: {}", e),
    }

    Ok(())
}
