use std::env;
use std::fs;
use std::process;

use tracing_subscriber::EnvFilter;
use walker_layout::layout::{LayoutConfig, LayoutEngine};
use walker_layout::measure::TextMetrics;
use walker_layout::outline::OutlineParser;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: {} <input.tree> [options]", args[0]);
        eprintln!();
        eprintln!("Options:");
        eprintln!("  -o, --output <file>             Output file (default: stdout)");
        eprintln!("  -s, --separation <n>            Gap between siblings (default: 1)");
        eprintln!("      --subtree-separation <n>    Gap between cousins (default: separation)");
        eprintln!("  -l, --level-height <n>          Distance between levels (default: 1)");
        eprintln!("  -w, --node-width <n>            Node width (default: widest label)");
        eprintln!("      --asymmetric                Left-to-right placement only");
        eprintln!("      --max-depth <n>             Deepest level accepted (default: 10000)");
        process::exit(1);
    }

    let input_path = &args[1];
    let mut output_path: Option<String> = None;
    let mut separation: Option<f64> = None;
    let mut subtree_separation: Option<f64> = None;
    let mut level_height: Option<f64> = None;
    let mut node_width: Option<f64> = None;
    let mut symmetric = true;
    let mut max_depth: Option<usize> = None;

    let mut i = 2;
    while i < args.len() {
        match args[i].as_str() {
            "-o" | "--output" => {
                i += 1;
                if i < args.len() {
                    output_path = Some(args[i].clone());
                }
            }
            "-s" | "--separation" => {
                i += 1;
                separation = Some(number_arg(&args, i));
            }
            "--subtree-separation" => {
                i += 1;
                subtree_separation = Some(number_arg(&args, i));
            }
            "-l" | "--level-height" => {
                i += 1;
                level_height = Some(number_arg(&args, i));
            }
            "-w" | "--node-width" => {
                i += 1;
                node_width = Some(number_arg(&args, i));
            }
            "--asymmetric" => symmetric = false,
            "--max-depth" => {
                i += 1;
                max_depth = Some(number_arg(&args, i));
            }
            _ => {
                eprintln!("Unknown option: {}", args[i]);
                process::exit(1);
            }
        }
        i += 1;
    }

    let input = match fs::read_to_string(input_path) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Failed to read {}: {}", input_path, e);
            process::exit(1);
        }
    };

    let outline = match OutlineParser::new(&input).parse() {
        Ok(o) => o,
        Err(e) => {
            eprintln!("Parse error: {}", e);
            process::exit(1);
        }
    };

    let defaults = LayoutConfig::default();
    let mut config = LayoutConfig::with_separation(
        separation.unwrap_or(defaults.min_separation),
        level_height.unwrap_or(defaults.level_height),
    );
    if let Some(sep) = subtree_separation {
        config.subtree_separation = sep;
    }
    config.node_width = node_width.unwrap_or_else(|| {
        TextMetrics::default().widest(outline.labels.iter().map(String::as_str))
    });
    config.symmetric = symmetric;
    if let Some(depth) = max_depth {
        config.max_depth = depth;
    }

    let engine = match LayoutEngine::new(config) {
        Ok(engine) => engine,
        Err(e) => {
            eprintln!("{}", e);
            process::exit(1);
        }
    };

    let layout = match engine.layout(&outline.tree, &outline.root) {
        Ok(layout) => layout,
        Err(e) => {
            eprintln!("Layout error: {}", e);
            process::exit(1);
        }
    };

    let text = walker_layout::format_positions(&outline, &layout);

    match output_path {
        Some(path) => {
            if let Err(e) = fs::write(&path, &text) {
                eprintln!("Failed to write {}: {}", path, e);
                process::exit(1);
            }
        }
        None => print!("{}", text),
    }
}

fn number_arg<T: std::str::FromStr>(args: &[String], i: usize) -> T {
    let Some(raw) = args.get(i) else {
        eprintln!("Missing value for {}", args[i - 1]);
        process::exit(1);
    };
    raw.parse().unwrap_or_else(|_| {
        eprintln!("Invalid number for {}: {}", args[i - 1], raw);
        process::exit(1);
    })
}
