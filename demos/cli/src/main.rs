use std::path::PathBuf;

use anyhow::Context;
use chrono::{DateTime, NaiveDate, Utc};
use clap::Parser;
use portfolio_core::{
    date_ms, engagements_from_json, layout_timeline, portfolio_engagements, TimelineConfig,
    TimelineLayout,
};

#[derive(Parser, Debug)]
#[command(
    name = "portfolio-cli",
    about = "In layout biểu đồ Gantt của trang portfolio."
)]
struct Args {
    /// File JSON chứa mảng engagement; mặc định dùng bảng dựng sẵn.
    #[arg(short, long)]
    input: Option<PathBuf>,

    #[arg(long)]
    min_year: Option<i32>,

    #[arg(long)]
    max_year: Option<i32>,

    /// Ngày coi là "hôm nay" (YYYY-MM-DD), mặc định là ngày hiện tại.
    #[arg(long)]
    today: Option<NaiveDate>,

    /// In layout dạng JSON thay vì bảng.
    #[arg(long)]
    json: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let engagements = match &args.input {
        Some(path) => {
            let data = std::fs::read_to_string(path)
                .with_context(|| format!("Không đọc được file {path:?}"))?;
            engagements_from_json(&data)
                .with_context(|| format!("File {path:?} không phải danh sách engagement"))?
        }
        None => portfolio_engagements(),
    };

    let mut config = TimelineConfig::default();
    if let Some(year) = args.min_year {
        config.min_year = year;
    }
    if let Some(year) = args.max_year {
        config.max_year = year;
    }

    let now = match args.today {
        Some(day) => DateTime::from_timestamp_millis(date_ms(day))
            .with_context(|| format!("Ngày {day} nằm ngoài phạm vi hỗ trợ"))?,
        None => Utc::now(),
    };

    let layout = layout_timeline(&engagements, &config, now)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&layout)?);
    } else {
        print_table(&layout);
    }

    Ok(())
}

fn print_table(layout: &TimelineLayout) {
    println!(
        "Window: {}..={}",
        layout.window.min_year(),
        layout.window.max_year()
    );

    let years: Vec<String> = layout
        .years
        .iter()
        .map(|marker| format!("{}@{:.2}%", marker.year, marker.left_percent))
        .collect();
    println!("Years: {}", years.join("  "));

    match layout.today {
        Some(today) => println!("Today: {:.2}%", today.left_percent),
        None => println!("Today: --"),
    }

    for bar in &layout.bars {
        let range = layout
            .hover
            .get(bar.id)
            .map(|content| content.date_range.as_str())
            .unwrap_or("--");
        println!(
            "{:<28} left {:>6.2}%  width {:>6.2}%  {}{}",
            bar.name,
            bar.geometry.left_percent,
            bar.geometry.width_percent,
            range,
            if bar.show_shine { "  *" } else { "" }
        );
    }
}
