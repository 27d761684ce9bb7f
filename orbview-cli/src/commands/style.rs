//! Style command - print or validate a style document.

use std::path::PathBuf;

use orbview::style::{globe_style, StyleDocument};

use crate::error::CliError;

/// Arguments for the style command.
pub struct StyleArgs {
    pub pretty: bool,
    pub layers: bool,
    pub file: Option<PathBuf>,
}

/// Run the style command.
pub fn run(args: StyleArgs) -> Result<(), CliError> {
    let style = match &args.file {
        Some(path) => {
            let doc = StyleDocument::load(path)?;
            doc.validate()?;
            tracing::info!(path = %path.display(), layers = doc.layers.len(), "Style file is valid");
            doc
        }
        None => (*globe_style()).clone(),
    };

    if args.layers {
        print!("{}", layer_table(&style));
    } else if args.pretty {
        println!("{}", style.to_json_pretty()?);
    } else {
        println!("{}", style.to_json()?);
    }

    Ok(())
}

/// One line per layer in paint order: index, id, type, source.
fn layer_table(style: &StyleDocument) -> String {
    let mut out = String::new();
    for (index, layer) in style.layers.iter().enumerate() {
        let source = match (&layer.source, &layer.source_layer) {
            (Some(source), Some(source_layer)) => format!("{}/{}", source, source_layer),
            (Some(source), None) => source.clone(),
            _ => "-".to_string(),
        };
        out.push_str(&format!(
            "{:>2}  {:<16} {:<10} {}\n",
            index, layer.id, layer.layer_type, source
        ));
    }
    out
}
