use std::fs;

use chrono::{DateTime, NaiveDate, Utc};
use portfolio_core::{
    bar_geometry, date_ms, engagements_from_json, layout_timeline, portfolio_engagements,
    today_marker, year_markers, Category, Engagement, EngagementEnd, TimelineConfig,
    TimelineError, TimelineWindow, MS_PER_DAY, ONGOING_CLASS,
};

const EPSILON: f64 = 1e-9;

fn fixture_path(name: &str) -> String {
    format!("{}/tests/data/{name}", env!("CARGO_MANIFEST_DIR"))
}

fn day(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("Ngày kiểm thử không hợp lệ")
}

fn at(year: i32, month: u32, d: u32) -> DateTime<Utc> {
    DateTime::from_timestamp_millis(date_ms(day(year, month, d))).expect("Mốc thời gian lỗi")
}

fn engagement(start: &str, end: &str) -> Engagement {
    Engagement {
        name: "Viscadia".to_string(),
        role: "Associate".to_string(),
        start: start.to_string(),
        end: end.to_string(),
        category: Category::Work,
        skills: vec!["Excel VBA".to_string(), "Python".to_string()],
    }
}

fn default_window() -> TimelineWindow {
    TimelineConfig::default()
        .window()
        .expect("Cửa sổ mặc định phải hợp lệ")
}

#[test]
fn year_markers_start_at_zero_and_increase() {
    let window = default_window();
    let markers = year_markers(&window);

    assert_eq!(markers.len(), 6);
    assert_eq!(markers[0].year, 2021);
    assert_eq!(markers[0].left_percent, 0.0);
    assert!(markers
        .windows(2)
        .all(|pair| pair[0].left_percent <= pair[1].left_percent));
    assert!(markers.iter().all(|marker| marker.left_percent < 100.0));
}

#[test]
fn axis_uses_uniform_365_day_years() {
    let window = default_window();
    assert_eq!(window.total_duration_ms(), 6 * 365 * MS_PER_DAY);

    // 2024 là năm nhuận nên mốc 2025 lệch một ngày so với 4/6 trục.
    let markers = year_markers(&window);
    let expected_2025 = (4.0 * 365.0 + 1.0) / (6.0 * 365.0) * 100.0;
    assert!((markers[4].left_percent - expected_2025).abs() < EPSILON);
}

#[test]
fn invalid_window_is_rejected() {
    let err = TimelineWindow::new(2026, 2021).unwrap_err();
    assert!(matches!(
        err,
        TimelineError::InvalidWindow {
            min_year: 2026,
            max_year: 2021
        }
    ));
}

#[test]
fn today_marker_only_inside_window() {
    let window = default_window();

    let inside = today_marker(&window, at(2025, 6, 15)).expect("Phải có vạch hôm nay");
    assert!(inside.left_percent > 0.0 && inside.left_percent < 100.0);

    assert!(today_marker(&window, at(2020, 12, 31)).is_none());
    assert!(today_marker(&window, at(2027, 1, 1)).is_none());
    assert!(today_marker(&window, at(2026, 12, 31)).is_some());
}

#[test]
fn bar_sits_between_neighbouring_year_markers() {
    let config = TimelineConfig::default();
    let layout = layout_timeline(
        &[engagement("2023-07-01", "2024-10-31")],
        &config,
        at(2025, 1, 1),
    )
    .expect("Không dựng được layout");

    let bar = &layout.bars[0];
    let marker_2023 = layout.years.iter().find(|m| m.year == 2023).unwrap();
    let marker_2025 = layout.years.iter().find(|m| m.year == 2025).unwrap();
    let right = bar.geometry.left_percent + bar.geometry.width_percent;

    assert!(bar.geometry.left_percent > marker_2023.left_percent);
    assert!(right < marker_2025.left_percent);

    let days = (day(2024, 10, 31) - day(2023, 7, 1)).num_days() as f64;
    let expected_width = days / (6.0 * 365.0) * 100.0;
    assert!((bar.geometry.width_percent - expected_width).abs() < EPSILON);
    assert_eq!(bar.class_name, "gantt-bar work");
    assert!(bar.show_shine);
    assert!(!bar.ongoing);
}

#[test]
fn in_window_bars_stay_inside_zero_to_hundred() {
    let config = TimelineConfig::default();
    let layout = layout_timeline(&portfolio_engagements(), &config, at(2025, 10, 1))
        .expect("Không dựng được layout");

    assert_eq!(layout.bars.len(), 4);
    for bar in &layout.bars {
        let geometry = bar.geometry;
        assert!(geometry.left_percent >= 0.0);
        assert!(geometry.width_percent >= 0.0);
        assert!(geometry.left_percent + geometry.width_percent <= 100.0 + EPSILON);
    }

    let finera = &layout.bars[0];
    assert!((finera.geometry.left_percent + finera.geometry.width_percent - 100.0).abs() < EPSILON);
}

#[test]
fn leap_days_never_push_bars_past_the_axis() {
    let window = TimelineWindow::new(2020, 2024).expect("Cửa sổ hợp lệ");
    let geometry = bar_geometry(
        &window,
        date_ms(day(2020, 1, 1)),
        date_ms(day(2024, 12, 31)),
    );

    assert_eq!(geometry.left_percent, 0.0);
    assert!(geometry.left_percent + geometry.width_percent <= 100.0);
}

#[test]
fn clamping_is_idempotent() {
    let window = default_window();
    let cases = [
        (day(2019, 3, 1), day(2022, 1, 1)),
        (day(2023, 7, 1), day(2024, 10, 31)),
        (day(2025, 4, 1), day(2029, 12, 31)),
        (day(2015, 1, 1), day(2016, 1, 1)),
        (day(2030, 1, 1), day(2031, 1, 1)),
    ];

    for (start, end) in cases {
        let first = bar_geometry(&window, date_ms(start), date_ms(end));
        let again = bar_geometry(&window, first.visual_start_ms, first.visual_end_ms);
        assert_eq!(first, again, "{start}..{end}");
    }
}

#[test]
fn out_of_window_records_collapse_to_zero_width() {
    let window = default_window();

    let before = bar_geometry(&window, date_ms(day(2015, 1, 1)), date_ms(day(2018, 1, 1)));
    assert_eq!(before.left_percent, 0.0);
    assert_eq!(before.width_percent, 0.0);

    let after = bar_geometry(&window, date_ms(day(2030, 1, 1)), date_ms(day(2031, 1, 1)));
    assert_eq!(after.width_percent, 0.0);
    assert!(after.left_percent <= 100.0);

    let reversed = bar_geometry(&window, date_ms(day(2024, 1, 1)), date_ms(day(2023, 1, 1)));
    assert_eq!(reversed.width_percent, 0.0);
}

#[test]
fn present_sentinel_ends_at_today_marker() {
    let config = TimelineConfig::default();
    let now = at(2025, 6, 15);
    let layout = layout_timeline(&[engagement("2024-03-01", "Present")], &config, now)
        .expect("Không dựng được layout");

    let bar = &layout.bars[0];
    let today = layout.today.expect("Phải có vạch hôm nay");
    assert!(bar.ongoing);
    assert_eq!(bar.geometry.visual_end_ms, now.timestamp_millis());
    assert!(
        (bar.geometry.left_percent + bar.geometry.width_percent - today.left_percent).abs()
            < EPSILON
    );
}

#[test]
fn present_sentinel_after_window_is_capped() {
    let config = TimelineConfig::default();
    let window = default_window();
    let layout = layout_timeline(&[engagement("2024-03-01", "Present")], &config, at(2028, 2, 1))
        .expect("Không dựng được layout");

    assert!(layout.today.is_none());
    assert_eq!(layout.bars[0].geometry.visual_end_ms, window.window_end_ms());
}

#[test]
fn future_sentinel_adds_one_year_then_clamps() {
    let config = TimelineConfig::default();
    let window = default_window();

    let early = layout_timeline(&[engagement("2022-01-01", "Future")], &config, at(2023, 1, 1))
        .expect("Không dựng được layout");
    assert_eq!(
        early.bars[0].geometry.visual_end_ms,
        date_ms(day(2024, 1, 1))
    );

    let late = layout_timeline(&[engagement("2025-04-01", "Future")], &config, at(2026, 6, 1))
        .expect("Không dựng được layout");
    assert_eq!(late.bars[0].geometry.visual_end_ms, window.window_end_ms());
}

#[test]
fn future_extension_is_configurable() {
    let config = TimelineConfig {
        future_extension_ms: 30 * MS_PER_DAY,
        ..TimelineConfig::default()
    };
    let layout = layout_timeline(&[engagement("2022-01-01", "Future")], &config, at(2023, 1, 1))
        .expect("Không dựng được layout");

    assert_eq!(
        layout.bars[0].geometry.visual_end_ms,
        date_ms(day(2023, 1, 31))
    );
}

#[test]
fn future_wins_over_present_in_combined_sentinel() {
    assert_eq!(
        EngagementEnd::parse("Present/Future").unwrap(),
        EngagementEnd::Future
    );
    assert_eq!(
        EngagementEnd::parse("Present").unwrap(),
        EngagementEnd::Present
    );
    assert_eq!(
        EngagementEnd::parse("2024-10-31").unwrap(),
        EngagementEnd::On(day(2024, 10, 31))
    );
}

#[test]
fn narrow_bars_skip_shine_overlay() {
    let config = TimelineConfig::default();
    let layout = layout_timeline(&portfolio_engagements(), &config, at(2025, 10, 1))
        .expect("Không dựng được layout");

    let intern = &layout.bars[3];
    assert!(intern.geometry.width_percent < config.shine_threshold_percent);
    assert!(!intern.show_shine);
}

#[test]
fn unparseable_date_aborts_the_whole_layout() {
    let config = TimelineConfig::default();
    let records = [
        engagement("2023-07-01", "2024-10-31"),
        engagement("July 2023", "2024-10-31"),
    ];

    let err = layout_timeline(&records, &config, at(2025, 1, 1)).unwrap_err();
    assert!(matches!(
        err,
        TimelineError::InvalidDate { field: "start", ref value } if value == "July 2023"
    ));
}

#[test]
fn fixture_engagements_lay_out_in_input_order() {
    let json = fs::read_to_string(fixture_path("engagements.json"))
        .expect("Không đọc được fixture engagement");
    let records = engagements_from_json(&json).expect("Fixture không hợp lệ");

    assert_eq!(records[2].category, Category::Education);
    assert_eq!(records[3].category, Category::Other("volunteer".to_string()));
    assert!(records[3].skills.is_empty());

    let layout = layout_timeline(&records, &TimelineConfig::default(), at(2025, 10, 1))
        .expect("Không dựng được layout");

    let names: Vec<&str> = layout.bars.iter().map(|bar| bar.name.as_str()).collect();
    assert_eq!(
        names,
        ["Northwind Analytics", "Roadmap", "State University", "Open Source"]
    );
    assert_eq!(layout.bars[3].class_name, "gantt-bar volunteer");

    let university = &layout.bars[2];
    assert_eq!(university.geometry.left_percent, 0.0);
    assert_eq!(
        university.geometry.visual_start_ms,
        layout.window.axis_start_ms()
    );

    let roadmap = &layout.bars[1];
    assert_eq!(
        roadmap.geometry.visual_end_ms,
        at(2025, 10, 1).timestamp_millis() + TimelineConfig::default().future_extension_ms
    );
}

#[test]
fn malformed_json_is_a_parse_error() {
    let err = engagements_from_json("{\"name\": 1}").unwrap_err();
    assert!(matches!(err, TimelineError::Parse(_)));
}

#[test]
fn ongoing_bars_carry_extra_class() {
    let json = fs::read_to_string(fixture_path("engagements.json"))
        .expect("Không đọc được fixture engagement");
    let records = engagements_from_json(&json).expect("Fixture không hợp lệ");
    let layout = layout_timeline(&records, &TimelineConfig::default(), at(2025, 10, 1))
        .expect("Không dựng được layout");

    let classes: Vec<String> = layout.bars.iter().map(|bar| bar.element_class()).collect();
    assert_eq!(classes[0], format!("gantt-bar work {ONGOING_CLASS}"));
    assert_eq!(classes[1], format!("gantt-bar project {ONGOING_CLASS}"));
    assert_eq!(classes[2], "gantt-bar education");
    assert_eq!(classes[3], "gantt-bar volunteer");
}
