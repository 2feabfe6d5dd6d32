//! tagfield - replays a scripted session through the tag field and reports
//! the committed tags

mod cli;

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;

use tagfield::editable::{RopeTagBuffer, TextRange};
use tagfield::{update, Cmd, Msg, TagField};

use cli::CliArgs;

/// Final state printed after a replay
#[derive(Debug, Serialize)]
struct Report {
    tags: Vec<String>,
    edited_text: String,
    selection: TextRange,
    commands: Vec<Cmd>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    exported: Vec<String>,
}

fn main() -> Result<()> {
    tagfield::tracing::init();

    let args = CliArgs::parse();
    let config = args.resolve_config().context("Failed to load config")?;

    let script = fs::read_to_string(&args.script)
        .with_context(|| format!("Failed to read script {}", args.script.display()))?;
    let messages: Vec<Msg> = serde_yaml::from_str(&script)
        .with_context(|| format!("Failed to parse script {}", args.script.display()))?;

    let mut field = TagField::from_config(&config).context("Failed to set up the tag field")?;
    tracing::info!("Replaying {} messages", messages.len());

    let commands: Vec<Cmd> = messages
        .into_iter()
        .filter_map(|msg| update(&mut field, msg))
        .collect();
    tracing::debug!("Final state: {}", field.dump());

    let exported = match &args.export {
        Some(dir) => export_pills(field.buffer(), dir)?,
        None => Vec::new(),
    };

    let report = Report {
        tags: field.tags(),
        edited_text: field.edited_text(),
        selection: field.selection(),
        commands,
        exported,
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("tags: {}", report.tags.join(", "));
        if !report.edited_text.is_empty() {
            println!("editing: {}", report.edited_text);
        }
        for path in &report.exported {
            println!("wrote {}", path);
        }
    }

    Ok(())
}

/// Write each tag pill in the buffer as a PNG, returning the written paths
fn export_pills(buffer: &RopeTagBuffer, dir: &Path) -> Result<Vec<String>> {
    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create export directory {}", dir.display()))?;

    let mut written = Vec::new();
    for (i, pill) in buffer.attachments().enumerate() {
        let bitmap = &pill.image;
        if bitmap.width() == 0 || bitmap.height() == 0 {
            tracing::warn!("Skipping empty pill for {:?}", pill.label);
            continue;
        }

        let image =
            image::RgbaImage::from_raw(bitmap.width() as u32, bitmap.height() as u32, bitmap.to_rgba8())
                .context("Pill bitmap does not match its dimensions")?;
        let path = dir.join(format!("{:02}-{}.png", i, file_stem(&pill.label)));
        image
            .save(&path)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        written.push(path.display().to_string());
    }
    Ok(written)
}

fn file_stem(label: &str) -> String {
    label
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { '_' })
        .collect()
}
