//! Aligned text tables for terminal output

use club_stats::{PlayerReport, TeamTable, Week};

const ABSENT_CELL: &str = "-";

fn cell(value: Option<u32>) -> String {
    value.map(|v| v.to_string()).unwrap_or_else(|| ABSENT_CELL.to_string())
}

/// Lay out rows under a header; the first column is left aligned, the rest right aligned
pub fn render_table(header: &[String], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = header.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (i, value) in row.iter().enumerate() {
            let len = value.chars().count();
            match widths.get_mut(i) {
                Some(width) => *width = (*width).max(len),
                None => widths.push(len),
            }
        }
    }

    let mut out = String::new();
    for line in std::iter::once(header).chain(rows.iter().map(Vec::as_slice)) {
        let cells: Vec<String> = line
            .iter()
            .zip(&widths)
            .enumerate()
            .map(|(i, (value, width))| {
                if i == 0 {
                    format!("{:<width$}", value, width = width)
                } else {
                    format!("{:>width$}", value, width = width)
                }
            })
            .collect();
        out.push_str(cells.join("  ").trim_end());
        out.push('\n');
    }
    out
}

/// Player report as an aligned table
pub fn format_player_report(report: &PlayerReport) -> String {
    let mut header = vec!["player".to_string(), "team".to_string()];
    header.extend(report.weeks.iter().map(|week| week.label().to_string()));
    header.extend(
        ["sum", "average", "win_rate", "teaming_rate", "no_shows"].iter().map(|c| c.to_string()),
    );

    let rows: Vec<Vec<String>> = report
        .rows
        .iter()
        .map(|row| {
            let mut line = vec![row.player.clone(), row.current_team.to_string()];
            line.extend(row.weeks.iter().copied().map(cell));
            line.push(row.sum.to_string());
            line.push(
                row.average
                    .map(|v| format!("{:.2}", v))
                    .unwrap_or_else(|| ABSENT_CELL.to_string()),
            );
            line.push(format!("{:.3}", row.win_rate));
            line.push(format!("{:.3}", row.teaming_rate));
            line.push(row.no_shows.to_string());
            line
        })
        .collect();

    render_table(&header, &rows)
}

/// Team table as an aligned table
pub fn format_team_table(table: &TeamTable) -> String {
    let mut header = vec!["team".to_string()];
    header.extend(table.weeks().iter().map(|week| week.label().to_string()));

    let rows: Vec<Vec<String>> = table
        .rows()
        .map(|(team, cells)| {
            let mut line = vec![team.to_string()];
            line.extend(cells.iter().copied().map(cell));
            line
        })
        .collect();

    render_table(&header, &rows)
}

/// One week's raw records grouped by team
pub fn format_week_records(week: &Week) -> String {
    let header: Vec<String> =
        ["team", "player", "day1", "day2", "day3", "total"].iter().map(|c| c.to_string()).collect();

    let mut records: Vec<_> = week.records.iter().collect();
    records.sort_by(|a, b| a.team.cmp(&b.team));

    let rows: Vec<Vec<String>> = records
        .into_iter()
        .map(|record| {
            let mut line = vec![record.team.to_string(), record.player.clone()];
            line.extend(record.scores.iter().copied().map(cell));
            line.push(record.total().to_string());
            line
        })
        .collect();

    render_table(&header, &rows)
}
