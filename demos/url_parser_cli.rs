use anyhow::{anyhow, Result};
use std::env;
use url_editor::url_parser::{decompose, ParsedUrl};

fn main() -> Result<()> {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: {} <url> | --batch <file>", args[0]);
        return Err(anyhow!("Missing URL argument"));
    }

    if args[1] == "--batch" {
        let file_path = args
            .get(2)
            .ok_or_else(|| anyhow!("Missing file path for batch processing"))?;
        process_url_batch(file_path)
    } else {
        process_single_url(&args[1])
    }
}

fn process_single_url(url: &str) -> Result<()> {
    println!("Processing URL: {}", url);

    let start = std::time::Instant::now();
    let parsed = decompose(url)?;
    let duration = start.elapsed();

    print_components(&parsed);

    if !parsed.parameters.is_empty() {
        println!("\nParameters:");
        for (i, parameter) in parsed.parameters.iter().enumerate() {
            match &parameter.value {
                Some(value) => println!("  {}. {} = {}", i + 1, parameter.name, value),
                None => println!("  {}. {} (no value)", i + 1, parameter.name),
            }
        }
    }

    println!("\nRebuilt URL: {}", parsed.to_url());
    println!("Processing time: {:?}", duration);

    Ok(())
}

fn print_components(parsed: &ParsedUrl) {
    let c = &parsed.components;
    let show = |value: &Option<String>| value.as_deref().map_or("-".to_string(), |v| format!("{:?}", v));

    println!("\nComponents:");
    println!("  scheme:    {}", show(&c.scheme));
    println!("  user info: {}", show(&c.user_info));
    println!("  domain:    {}", show(&c.domain));
    println!("  port:      {}", show(&c.port));
    println!("  path:      {}", show(&c.path));
    println!("  query:     {}", show(&c.raw_query));
    println!("  fragment:  {}", show(&c.fragment));
}

fn process_url_batch(file_path: &str) -> Result<()> {
    // One URL per line; blank lines and '#' comments are skipped
    let content = std::fs::read_to_string(file_path)?;
    let urls: Vec<&str> = content
        .lines()
        .filter(|line| !line.trim().is_empty() && !line.trim().starts_with('#'))
        .collect();

    println!("Processing {} URLs from file: {}", urls.len(), file_path);
    let start = std::time::Instant::now();

    let mut failed = Vec::new();
    let mut unstable = Vec::new();
    for url in &urls {
        match decompose(url) {
            Ok(parsed) => {
                let once = parsed.to_url();
                let twice = decompose(&once).map(|p| p.to_url());
                if twice.as_deref().ok() != Some(once.as_str()) {
                    unstable.push(*url);
                }
            }
            Err(err) => failed.push((*url, err)),
        }
    }

    let duration = start.elapsed();

    println!("\nSummary:");
    println!("Processed: {} URLs", urls.len());
    println!("Failed: {} URLs", failed.len());
    println!("Unstable round trips: {} URLs", unstable.len());
    println!("Total processing time: {:?}", duration);

    if !failed.is_empty() {
        println!("\nErrors:");
        for (url, err) in failed {
            println!("  URL: {}", url);
            println!("  Error: {}", err);
        }
    }

    for url in unstable {
        println!("  Unstable: {}", url);
    }

    Ok(())
}
