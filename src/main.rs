use clap::Parser;
use seo_signals::scoring::CheckOutcome;
use seo_signals::{Analysis, Analyzer};

mod args;
use args::{Args, convert_canonical_policy};

#[tokio::main]
async fn main() {
    // Initialize logging
    env_logger::init();

    // Parse command-line arguments
    let args = Args::parse();

    ::log::info!("Analyzing page: {}", args.url);

    let mut analyzer = Analyzer::new(&args.url);

    if let Some(path) = &args.config {
        analyzer = match analyzer.with_config_file(path) {
            Ok(analyzer) => analyzer,
            Err(e) => {
                ::log::error!("Failed to load configuration {}: {}", path, e);
                std::process::exit(2);
            }
        };
    }
    if let Some(concurrency) = args.concurrency {
        analyzer = analyzer.with_max_concurrency(concurrency);
    }
    if let Some(timeout) = args.timeout {
        analyzer = analyzer.with_check_timeout(timeout);
    }
    if let Some(policy) = args.canonical_policy {
        analyzer = analyzer.with_canonical_policy(convert_canonical_policy(policy));
    }
    if let Some(webdriver_url) = args.webdriver {
        analyzer = analyzer.with_webdriver(Some(webdriver_url).filter(|url| !url.is_empty()));
    }

    let start_time = std::time::Instant::now();
    let analysis = match analyzer.run().await {
        Ok(analysis) => analysis,
        Err(e) => {
            ::log::error!("Failed to start analysis: {}", e);
            std::process::exit(1);
        }
    };
    ::log::info!(
        "Analysis complete in {:.2} seconds",
        start_time.elapsed().as_secs_f64()
    );

    if args.json {
        match serde_json::to_string_pretty(&analysis) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                ::log::error!("Failed to serialize analysis: {}", e);
                std::process::exit(1);
            }
        }
    } else {
        print_summary(&analysis);
    }
}

fn print_summary(analysis: &Analysis) {
    let facts = &analysis.facts;
    let report = &analysis.report;

    println!("{}", facts.url);
    println!("  HTTP status:     {}", facts.http_status);
    println!("  Title:           {}", facts.title);
    println!(
        "  Words:           {} ({} characters)",
        facts.total_words, facts.total_characters
    );
    println!(
        "  Links:           {} internal, {} external, {} invalid",
        facts.links.internal.len(),
        facts.links.external.len(),
        facts.invalid_internal_links.len()
    );
    println!();
    println!("  Overall:         {}/100", report.overall);
    println!("  Title length:    {}/100", report.title);
    println!("  Description:     {}/100", report.description);
    println!("  Link structure:  {}/100", report.link_structure);
    println!("  Content depth:   {}/100", report.content_depth);
    println!();

    for check in &report.checks {
        print_check(check);
    }
}

fn print_check(check: &CheckOutcome) {
    let mark = if check.passed { "PASS" } else { "FAIL" };
    println!("  [{}] {}", mark, check.id.label());
    for item in &check.failing {
        println!("         - {}", item);
    }
}
