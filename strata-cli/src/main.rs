//! Strata CLI
//!
//! Drives the layer engine against a JSON file store, the same record an
//! in-page overlay would persist.

use std::collections::HashMap;
use std::path::PathBuf;

use anyhow::{Context, Result, bail, ensure};
use clap::{Parser, Subcommand};
use owo_colors::OwoColorize;
use strata_common::trace::set_verbose;
use strata_core::{Engine, EngineConfig, FileStore, Layer, LayerId, MemoryStore};
use strata_css::{ColorValue, OutlineValue};
use strata_dom::{NodeId, NodeType};
use strata_page::{ContentScript, Page};

/// Strata: outline nested page layout one depth layer at a time
#[derive(Parser, Debug)]
#[command(name = "strata")]
#[command(author, version, about, long_about = None)]
#[command(after_help = r#"EXAMPLES:
    # Add two layers and show them
    strata add
    strata add
    strata list

    # Recolor and disable a layer
    strata color 1718000000000 '#ff8800'
    strata disable 1718000000000

    # Print the stylesheet the page would receive
    strata css

    # Render a fixture page and show which element gets which outline
    strata preview --depth 4 --breadth 2
"#)]
struct Cli {
    /// JSON file holding the persisted layer state
    #[arg(long, value_name = "FILE", default_value = ".strata-state.json", global = true)]
    store: PathBuf,

    /// Engine configuration (JSON)
    #[arg(long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    /// Trace engine state transitions to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Add a layer one nesting level deeper than the current count
    Add,
    /// Delete a layer
    Delete {
        /// Layer id
        id: u64,
    },
    /// Enable a layer
    Enable {
        /// Layer id
        id: u64,
    },
    /// Disable a layer without deleting it
    Disable {
        /// Layer id
        id: u64,
    },
    /// Change a layer's outline color
    Color {
        /// Layer id
        id: u64,
        /// Hex color or basic color keyword
        color: String,
    },
    /// Delete every layer and restart the palette
    Clear,
    /// List layers in display order
    List,
    /// Print the synthesized stylesheet
    Css,
    /// Print the persisted record
    Export,
    /// Render a nested fixture page with the panel and print resolved outlines
    Preview {
        /// Nesting depth of each fixture column
        #[arg(long, default_value = "4")]
        depth: usize,
        /// Number of fixture columns
        #[arg(long, default_value = "2")]
        breadth: usize,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    set_verbose(cli.verbose);

    let config = match &cli.config {
        Some(path) => EngineConfig::load(path)
            .with_context(|| format!("failed to load config from {}", path.display()))?,
        None => EngineConfig::default(),
    };
    let mut engine = Engine::start(&config, FileStore::new(&cli.store));

    match cli.command {
        Command::Add => {
            let (id, _) = engine.add_layer().context("failed to save layer state")?;
            if let Some(layer) = engine.layer(id) {
                println!("Added {}", describe(layer));
            }
        }
        Command::Delete { id } => {
            let id = require_layer(&engine, id)?;
            let _ = engine.delete_layer(id).context("failed to save layer state")?;
            println!("Deleted layer {id}");
        }
        Command::Enable { id } | Command::Disable { id } => {
            let enabled = matches!(cli.command, Command::Enable { .. });
            let id = require_layer(&engine, id)?;
            let _ = engine
                .set_enabled(id, enabled)
                .context("failed to save layer state")?;
            println!("{} layer {id}", if enabled { "Enabled" } else { "Disabled" });
        }
        Command::Color { id, ref color } => {
            let Some(value) = ColorValue::parse(color) else {
                bail!("'{color}' is not a hex color or basic color keyword");
            };
            let id = require_layer(&engine, id)?;
            let _ = engine
                .set_color(id, &value.to_hex_string())
                .context("failed to save layer state")?;
            if let Some(layer) = engine.layer(id) {
                println!("Recolored {}", describe(layer));
            }
        }
        Command::Clear => {
            let removed = engine.layers().len();
            let _ = engine.clear_all().context("failed to save layer state")?;
            println!("Cleared {removed} layer(s)");
        }
        Command::List => print_layers(engine.layers()),
        Command::Css => println!("{}", engine.stylesheet()),
        Command::Export => println!("{}", serde_json::to_string_pretty(engine.state())?),
        Command::Preview { depth, breadth } => preview(&config, &engine, depth, breadth)?,
    }
    Ok(())
}

/// The id of an existing layer.
fn require_layer(engine: &Engine<FileStore>, id: u64) -> Result<LayerId> {
    let id = LayerId(id);
    ensure!(engine.layer(id).is_some(), "no layer with id {id}");
    Ok(id)
}

/// A terminal swatch in the given CSS color.
fn swatch(color: &str) -> String {
    ColorValue::parse(color).map_or_else(
        || "??".dimmed().to_string(),
        |c| "\u{2588}\u{2588}".truecolor(c.r, c.g, c.b).to_string(),
    )
}

fn describe(layer: &Layer) -> String {
    format!("layer {} {} {} ({})", layer.id, swatch(&layer.color), layer.color, layer.selector)
}

fn print_layers(layers: &[Layer]) {
    if layers.is_empty() {
        println!("No layers.");
        return;
    }
    println!("{}", format!("{:<4} {:<15} {:<4} {:<10} SELECTOR", "#", "ID", "ON", "COLOR").bold());
    for (index, layer) in layers.iter().enumerate() {
        let enabled = if layer.enabled {
            "on ".green().to_string()
        } else {
            "off".dimmed().to_string()
        };
        println!(
            "{:<4} {:<15} {enabled}  {} {:<7} {}",
            index + 1,
            layer.id.to_string(),
            swatch(&layer.color),
            layer.color,
            layer.selector
        );
    }
}

/// Attach the overlay to a fixture page and print each element with the
/// outline the cascade resolves for it.
fn preview(
    config: &EngineConfig,
    engine: &Engine<FileStore>,
    depth: usize,
    breadth: usize,
) -> Result<()> {
    let record = serde_json::to_string(engine.state())?;
    let store = MemoryStore::with_entry(&config.storage_key, &record);
    let mut script = ContentScript::new(config, store);
    let mut page = Page::with_nested_divs(depth, breadth);
    let _ = script.activate(&mut page);

    let outlines = page.resolved_outlines();
    let panel = script.presenter().find(page.tree());
    let Some(body) = page.tree().body() else {
        bail!("fixture page has no body");
    };

    println!("=== Preview (depth {depth}, breadth {breadth}) ===");
    print_outlined(&page, &outlines, panel, body, 0);

    println!("\n=== Stylesheet ===");
    if let Some(css) = page.style_text(&config.style_id) {
        println!("{css}");
    }
    Ok(())
}

fn print_outlined(
    page: &Page,
    outlines: &HashMap<NodeId, OutlineValue>,
    panel: Option<NodeId>,
    id: NodeId,
    indent: usize,
) {
    let tree = page.tree();
    let Some(NodeType::Element(data)) = tree.get(id).map(|node| &node.node_type) else {
        return;
    };
    let prefix = "  ".repeat(indent);
    let attrs: Vec<String> = data.attrs.iter().map(|(k, v)| format!("{k}=\"{v}\"")).collect();
    let tag = if attrs.is_empty() {
        format!("<{}>", data.tag_name)
    } else {
        format!("<{} {}>", data.tag_name, attrs.join(" "))
    };

    if Some(id) == panel {
        let elements: Vec<NodeId> = std::iter::once(id)
            .chain(tree.descendants(id))
            .filter(|&n| tree.as_element(n).is_some())
            .collect();
        let clean = elements
            .iter()
            .all(|n| matches!(outlines.get(n), None | Some(OutlineValue::None)));
        let status = if clean {
            "no outlines".green().to_string()
        } else {
            "OUTLINED".red().to_string()
        };
        println!("{prefix}{tag}  [panel, {} elements, {status}]", elements.len());
        return;
    }

    match outlines.get(&id) {
        Some(OutlineValue::Line { color, .. }) => {
            let hex = color.to_hex_string();
            println!("{prefix}{tag}  {} {hex}", swatch(&hex));
        }
        Some(OutlineValue::None) => println!("{prefix}{tag}  {}", "none".dimmed()),
        None => println!("{prefix}{tag}"),
    }
    for &child in tree.children(id) {
        print_outlined(page, outlines, panel, child, indent + 1);
    }
}
