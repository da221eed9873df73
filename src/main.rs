//! Command-line interface for xmlcanon

#[cfg(feature = "cli")]
use clap::{Parser, Subcommand};

#[cfg(feature = "cli")]
use std::fs;
#[cfg(feature = "cli")]
use std::path::PathBuf;

#[cfg(feature = "cli")]
use xmlcanon::catalog;
#[cfg(feature = "cli")]
use xmlcanon::DocumentType;

#[cfg(feature = "cli")]
#[derive(Parser, Debug)]
#[command(name = "xmlcanon")]
#[command(author, version, about = "Schema-checked canonicalization of configuration documents", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[cfg(feature = "cli")]
#[derive(Subcommand, Debug)]
enum Commands {
    /// Canonicalize a document against a built-in schema
    Canonicalize {
        /// Path to the document to canonicalize
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Name of the built-in schema to validate against
        #[arg(short, long, default_value = "ukm")]
        schema: String,

        /// Only check: exit non-zero if the file is not already canonical
        #[arg(long)]
        check: bool,

        /// Rewrite the file in place instead of printing to stdout
        #[arg(short, long)]
        in_place: bool,
    },

    /// Show the structure of a built-in schema
    Inspect {
        /// Name of the built-in schema
        #[arg(value_name = "SCHEMA", default_value = "ukm")]
        schema: String,

        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// List the built-in schemas
    Schemas,
}

#[cfg(feature = "cli")]
fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Canonicalize {
            file,
            schema,
            check,
            in_place,
        } => cmd_canonicalize(file, &schema, check, in_place),
        Commands::Inspect { schema, json } => cmd_inspect(&schema, json),
        Commands::Schemas => {
            for name in catalog::NAMES {
                println!("{}", name);
            }
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}

#[cfg(feature = "cli")]
fn resolve_schema(name: &str) -> Result<&'static DocumentType, Box<dyn std::error::Error>> {
    catalog::lookup(name).ok_or_else(|| {
        format!(
            "unknown schema '{}'. Available: {}",
            name,
            catalog::NAMES.join(", ")
        )
        .into()
    })
}

#[cfg(feature = "cli")]
fn cmd_canonicalize(
    file: PathBuf,
    schema: &str,
    check: bool,
    in_place: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let doc = resolve_schema(schema)?;
    let original = fs::read_to_string(&file)?;
    let canonical = doc.canonicalize(&original)?;

    if check {
        if canonical == original {
            println!("✓ {} is canonical", file.display());
            Ok(())
        } else {
            println!("✗ {} is not canonical", file.display());
            std::process::exit(1);
        }
    } else if in_place {
        if canonical != original {
            fs::write(&file, &canonical)?;
        }
        Ok(())
    } else {
        print!("{}", canonical);
        Ok(())
    }
}

#[cfg(feature = "cli")]
fn cmd_inspect(schema: &str, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let doc = resolve_schema(schema)?;
    let summary = doc.summary();

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    println!("xmlcanon {}", xmlcanon::VERSION);
    println!("Schema: {}", schema);
    println!("Root: {}", summary.root);
    println!("Node types: {}", summary.types.len());
    for type_summary in &summary.types {
        println!();
        println!("  <{}> ({})", type_summary.tag, type_summary.kind);
        for attribute in &type_summary.attributes {
            match &attribute.pattern {
                Some(pattern) => println!("    @{} pattern: {}", attribute.name, pattern),
                None => println!("    @{}", attribute.name),
            }
        }
        for child in &type_summary.children {
            println!("    <{}> {}", child.tag, child.multiplicity);
        }
    }
    Ok(())
}

#[cfg(not(feature = "cli"))]
fn main() {
    eprintln!("CLI feature not enabled. Rebuild with --features cli");
    std::process::exit(1);
}
