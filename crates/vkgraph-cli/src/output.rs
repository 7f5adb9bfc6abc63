//! Terminal output formatting.

use colored::Colorize;
use vkgraph_core::{CrawlReport, QueryResult, StoreCounts};

/// Print a query result, one line per row.
pub fn print_query_result(result: &QueryResult) {
    for line in result.render_lines() {
        println!("{}", line);
    }
}

pub fn print_no_such_query(name: &str) {
    println!("{} {}", "no such query:".red(), name);
}

/// Print store node/relationship counts.
pub fn print_counts(counts: &StoreCounts) {
    println!("{}", "Graph Status".bold());
    println!("{}", "─".repeat(40));
    println!("  Users:         {}", counts.users.to_string().cyan());
    println!("  Groups:        {}", counts.groups.to_string().cyan());
    println!("  Follows:       {}", counts.follows.to_string().cyan());
    println!("  Subscriptions: {}", counts.subscriptions.to_string().cyan());
    println!("{}", "─".repeat(40));
}

/// Print what a crawl did, followed by the resulting store totals.
pub fn print_crawl_report(report: &CrawlReport, counts: &StoreCounts) {
    println!("\n{}", "Crawl complete:".green().bold());
    println!("  Profiles fetched:      {}", report.profiles_fetched);
    println!("  Users upserted:        {}", report.users_upserted);
    println!("  Groups upserted:       {}", report.groups_upserted);
    println!("  Relationships linked:  {}", report.relationships_linked());

    if report.skipped_revisits > 0 {
        println!("  Revisits skipped:      {}", report.skipped_revisits);
    }
    if report.failed_fetches > 0 {
        println!("  {} {}", "Failed fetches:       ".yellow(), report.failed_fetches);
    }

    println!();
    print_counts(counts);
}
