use anyhow::Result;
use colored::*;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use super::{star_histogram, ScoredDataset};
use crate::hooks::display::star_glyphs;
use crate::models::StarRating;

/// Render a colored terminal report.
pub fn render(rows: &[ScoredDataset], verbose: bool, quiet: bool) -> Result<()> {
    let total = rows.len();
    let histogram = star_histogram(rows);
    let closed = histogram[0];
    let open = total - closed;

    if quiet {
        println!(
            "Total: {}  Open: {}  Closed: {}  Average: {}",
            total,
            open.to_string().green(),
            closed.to_string().red(),
            average_stars(rows)
        );
        return Ok(());
    }

    println!(
        "\n {} v{}\n",
        "openness-stars".bold(),
        env!("CARGO_PKG_VERSION")
    );

    println!(" ┌────────────────────────────────────────────────────┐");
    println!(" │  {:<48} │", "SUMMARY".bold());
    println!(" │  {:<48} │", format!("Total datasets : {}", total));
    for stars in (0..=StarRating::MAX).rev() {
        let label = StarRating::new(stars).map(star_glyphs).unwrap_or_default();
        println!(
            " │  {:<48} │",
            format!("{}  : {:>4}", label, histogram[usize::from(stars)])
        );
    }
    println!(" │  {:<48} │", format!("Average        : {}", average_stars(rows)));
    println!(" └────────────────────────────────────────────────────┘\n");

    if total > 0 {
        render_table(rows, verbose);
        println!();
    }

    if closed > 0 {
        println!(
            " {} {} dataset(s) have no license or a license that is not open\n",
            "[CLOSED]".red().bold(),
            closed
        );
    }

    Ok(())
}

fn render_table(rows: &[ScoredDataset], verbose: bool) {
    let mut header = vec![
        Cell::new("Dataset").add_attribute(Attribute::Bold),
        Cell::new("License").add_attribute(Attribute::Bold),
        Cell::new("Formats").add_attribute(Attribute::Bold),
        Cell::new("Stars").add_attribute(Attribute::Bold),
    ];
    if verbose {
        header.push(Cell::new("Reason").add_attribute(Attribute::Bold));
    }

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(header);

    for row in rows {
        let license = row.dataset.license_id.as_deref().unwrap_or("none");
        let stars = row.stars();

        let mut cells = vec![
            Cell::new(row.dataset.label()),
            Cell::new(license),
            Cell::new(format_list(row)),
            Cell::new(star_glyphs(stars))
                .fg(star_color(stars))
                .set_alignment(CellAlignment::Center),
        ];
        if verbose {
            cells.push(Cell::new(&row.qa.openness_score_reason));
        }
        table.add_row(cells);
    }

    println!("{}", table);
}

fn star_color(stars: StarRating) -> Color {
    match stars.get() {
        0 => Color::Red,
        1 | 2 => Color::Yellow,
        3 | 4 => Color::Green,
        _ => Color::Cyan,
    }
}

/// Distinct resource formats in first-seen order.
fn format_list(row: &ScoredDataset) -> String {
    let mut seen: Vec<&str> = Vec::new();
    for format in row.dataset.resources().iter().filter_map(|r| r.format.as_deref()) {
        if !format.is_empty() && !seen.contains(&format) {
            seen.push(format);
        }
    }
    if seen.is_empty() {
        "-".to_string()
    } else {
        seen.join(", ")
    }
}

fn average_stars(rows: &[ScoredDataset]) -> String {
    if rows.is_empty() {
        return "-".to_string();
    }
    let sum: u32 = rows.iter().map(|r| u32::from(r.stars().get())).sum();
    format!("{:.2}", f64::from(sum) / rows.len() as f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Dataset, Resource, ScoreResult};

    fn row(formats: &[&str], stars: u8) -> ScoredDataset {
        ScoredDataset {
            dataset: Dataset {
                resources: Some(formats.iter().map(|f| Resource::with_format(f)).collect()),
                ..Dataset::default()
            },
            qa: ScoreResult::new(StarRating::new(stars).unwrap(), "r"),
        }
    }

    #[test]
    fn test_format_list_dedups() {
        assert_eq!(format_list(&row(&["CSV", "csv", "CSV", ""], 3)), "CSV, csv");
        assert_eq!(format_list(&row(&[], 1)), "-");
    }

    #[test]
    fn test_average_stars() {
        assert_eq!(average_stars(&[]), "-");
        assert_eq!(average_stars(&[row(&[], 1), row(&[], 4)]), "2.50");
    }
}
