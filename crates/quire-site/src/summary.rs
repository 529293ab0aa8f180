//! Post listings as JSON, table or markdown.

use quire_core::Post;
use serde::Serialize;

/// Output format for post listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Table,
    Markdown,
}

/// One row of a post listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PostSummary {
    pub date: String,
    pub id: String,
    pub title: String,
    pub minutes: u32,
    pub words: usize,
    pub tags: Vec<String>,
}

impl From<&Post> for PostSummary {
    fn from(post: &Post) -> Self {
        let fm = post.frontmatter();
        Self {
            date: fm.date.format("%Y-%m-%d").to_string(),
            id: post.id.clone(),
            title: fm.title.to_string(),
            minutes: post.meta.reading_time,
            words: post.meta.words,
            tags: fm.tags.clone(),
        }
    }
}

const COLUMNS: [&str; 6] = ["date", "id", "title", "minutes", "words", "tags"];

impl PostSummary {
    fn cells(&self) -> [String; 6] {
        [
            self.date.clone(),
            self.id.clone(),
            self.title.clone(),
            self.minutes.to_string(),
            self.words.to_string(),
            self.tags.join(", "),
        ]
    }
}

/// Format a post listing in the specified output format.
#[must_use]
pub fn format_summary(posts: &[Post], format: OutputFormat) -> String {
    let rows: Vec<PostSummary> = posts.iter().map(PostSummary::from).collect();
    match format {
        OutputFormat::Json => format_json(&rows),
        OutputFormat::Table => format_table(&rows),
        OutputFormat::Markdown => format_markdown(&rows),
    }
}

fn format_json(rows: &[PostSummary]) -> String {
    serde_json::to_string_pretty(rows).unwrap_or_else(|_| "[]".to_string())
}

fn format_table(rows: &[PostSummary]) -> String {
    if rows.is_empty() {
        return "(no posts)".to_string();
    }

    let cells: Vec<[String; 6]> = rows.iter().map(PostSummary::cells).collect();

    let mut widths: Vec<usize> = COLUMNS.iter().map(|c| c.chars().count()).collect();
    for row in &cells {
        for (i, cell) in row.iter().enumerate() {
            widths[i] = widths[i].max(cell.chars().count());
        }
    }

    let mut output = String::new();

    let header: Vec<String> = COLUMNS
        .iter()
        .enumerate()
        .map(|(i, c)| format!("{:width$}", c, width = widths[i]))
        .collect();
    output.push_str(header.join(" | ").trim_end());
    output.push('\n');

    let sep: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    output.push_str(&sep.join("-+-"));
    output.push('\n');

    for row in &cells {
        let vals: Vec<String> = row
            .iter()
            .enumerate()
            .map(|(i, val)| format!("{:width$}", val, width = widths[i]))
            .collect();
        output.push_str(vals.join(" | ").trim_end());
        output.push('\n');
    }

    output
}

fn format_markdown(rows: &[PostSummary]) -> String {
    if rows.is_empty() {
        return "*No posts*\n".to_string();
    }

    let mut output = String::new();

    output.push_str("| ");
    output.push_str(&COLUMNS.join(" | "));
    output.push_str(" |\n");

    output.push_str("| ");
    output.push_str(&["---"; 6].join(" | "));
    output.push_str(" |\n");

    for row in rows {
        let vals: Vec<String> = row.cells().iter().map(|c| c.replace('|', "\\|")).collect();
        output.push_str("| ");
        output.push_str(&vals.join(" | "));
        output.push_str(" |\n");
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use quire_content::{build_post, CrawlOptions};

    fn sample_posts() -> Vec<Post> {
        [
            ("alpha", "Alpha | Post", "2021-02-03", "[rust, web]"),
            ("beta", "Beta Post", "2020-01-01", "[]"),
        ]
        .iter()
        .map(|(id, title, date, tags)| {
            let md = format!(
                "---\ntitle: \"{title}\"\nsubtitle: s\ndate: {date}\ntags: {tags}\n---\none two three\n"
            );
            build_post(id, &format!("{id}.md"), &md, &CrawlOptions::default()).unwrap()
        })
        .collect()
    }

    #[test]
    fn format_as_json() {
        let output = format_summary(&sample_posts(), OutputFormat::Json);
        let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed[0]["id"], "alpha");
        assert_eq!(parsed[0]["date"], "2021-02-03");
        assert_eq!(parsed[0]["words"], 3);
        assert_eq!(parsed[0]["tags"][1], "web");
    }

    #[test]
    fn format_as_table() {
        let output = format_summary(&sample_posts(), OutputFormat::Table);
        let lines: Vec<&str> = output.lines().collect();
        assert!(lines[0].starts_with("date"));
        assert!(lines[1].contains("-+-"));
        assert!(lines[2].contains("alpha"));
        assert!(lines[2].contains("rust, web"));
        assert_eq!(lines.len(), 4);
    }

    #[test]
    fn format_as_markdown_escapes_pipes() {
        let output = format_summary(&sample_posts(), OutputFormat::Markdown);
        assert!(output.starts_with("| date | id | title"));
        assert!(output.contains("| --- |"));
        assert!(output.contains("Alpha \\| Post"));
    }

    #[test]
    fn format_empty_listing() {
        assert_eq!(format_summary(&[], OutputFormat::Table), "(no posts)");
        assert_eq!(format_summary(&[], OutputFormat::Markdown), "*No posts*\n");
        assert_eq!(format_summary(&[], OutputFormat::Json), "[]");
    }
}
