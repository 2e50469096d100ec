//! Integration tests for charts and TOML chart descriptions

use std::fs;

use kml_chart::{
    render, BarSeries, Chart, ChartConfigError, ChartDescription, ColorBar, KmlError,
    OverlayOptions, Rgb, Ring, SurfaceSeries,
};
use pretty_assertions::assert_eq;

const DESCRIPTION: &str = r#"
[chart]
title = "Measurements"
description = "Campaign 7"

[styles.highlight]
records = [
    { kind = "PolyStyle", color = "ff0000ff", outline = 0 },
    { kind = "LineStyle", color = "ffffffff", width = 2 },
]

[[bars]]
name = "Heights"
lon = [10.0, 10.01, 10.02]
lat = [51.0, 51.0, 51.0]
values = [500.0, nan, 2400.0]
colorbar = "jet2"
relative_to_ground = true
labels = ["north", "middle", "south"]

[[bars]]
name = "Marked"
lon = [11.0, 11.5]
lat = [52.0, 52.0]
values = [1.0, 2.0]
radius = 0.1
style = "highlight"

[[surfaces]]
name = "Ground"
polygons = [
    [[10.0, 51.0], [10.01, 51.0], [10.01, 51.01], [10.0, 51.0]],
    [[10.01, 51.0], [10.02, 51.0], [10.02, 51.01], [10.01, 51.0]],
]
values = [3.0, 4.5]
border_color = [0, 0, 255]
opacity = 128
"#;

#[test]
fn test_description_to_kml() {
    let kml = render(DESCRIPTION).unwrap();
    assert!(kml.contains("<name>Measurements</name>"));
    assert!(kml.contains("<description>Campaign 7</description>"));
    assert!(kml.contains(r#"<Style id="highlight">"#));
    assert!(kml.contains("<name>Heights</name>"));
    assert!(kml.contains("<name>south</name>"));
    assert!(!kml.contains("<name>middle</name>"));
    assert!(kml.contains("<altitudeMode>relativeToGround</altitudeMode>"));
    assert!(kml.contains("<styleUrl>#highlight</styleUrl>"));
    assert!(kml.contains("<color>80800000</color>"));
    assert!(kml.contains("<color>80ff0000</color>"));

    // the registered style precedes every folder
    let style = kml.find(r#"<Style id="highlight">"#).unwrap();
    let folder = kml.find("<Folder>").unwrap();
    assert!(style < folder);
}

#[test]
fn test_description_structure() {
    let chart = ChartDescription::from_str(DESCRIPTION)
        .unwrap()
        .build()
        .unwrap();
    let folders = chart.document().children();
    assert_eq!(folders.len(), 3);
    let counts: Vec<_> = folders.iter().map(|f| f.children().len()).collect();
    assert_eq!(counts, vec![2, 2, 2]);

    let bar = &folders[0].children()[0].children()[0];
    let ring = bar.outer_boundary().unwrap();
    assert_eq!(ring.len(), 33);
    assert_eq!(ring.coordinates()[0].alt, Some(500.0));
}

#[test]
fn test_description_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("chart.toml");
    fs::write(&path, DESCRIPTION).unwrap();

    let description = ChartDescription::from_file(&path).unwrap();
    assert_eq!(description.bars.len(), 2);
    assert_eq!(description.surfaces.len(), 1);

    let missing = ChartDescription::from_file(&dir.path().join("missing.toml")).unwrap_err();
    assert!(matches!(missing, ChartConfigError::IoError(_)));
}

#[test]
fn test_legend_ticks() {
    let description = ChartDescription::from_str(DESCRIPTION).unwrap();
    let legends = description.legends().unwrap();
    let names: Vec<_> = legends.iter().map(|(name, _)| name.as_str()).collect();
    assert_eq!(names, vec!["Heights", "Marked", "Ground"]);

    let ground: Vec<_> = legends[2]
        .1
        .ticks()
        .iter()
        .map(|t| t.label.as_str())
        .collect();
    assert_eq!(ground.len(), 16);
    assert_eq!(ground.first(), Some(&"3.0"));
    assert_eq!(ground.last(), Some(&"4.5"));
}

#[test]
fn test_chart_api_and_save() {
    let mut chart = Chart::new("Programmatic", None);
    chart
        .add_bars(
            &BarSeries::new(
                vec![0.0, 0.01],
                vec![0.0, 0.0],
                vec![Some(10.0), Some(20.0)],
            )
            .with_colorbar(ColorBar::jet2())
            .with_display_name("Bars"),
        )
        .unwrap()
        .add_surface(
            &SurfaceSeries::new(
                vec![Ring::new([[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 0.0]]).unwrap()],
                vec![Some(1.0)],
            )
            .with_border(Rgb::new(255, 255, 255), 2.0),
        )
        .unwrap()
        .add_legend_overlay("legend.png", OverlayOptions::new().with_name("Legend"))
        .unwrap();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("chart.kml");
    chart.save(&path).unwrap();
    assert_eq!(fs::read_to_string(&path).unwrap(), chart.to_kml_string());
}

#[test]
fn test_radius_cannot_be_determined() {
    let mut chart = Chart::new("C", None);
    let err = chart
        .add_bars(&BarSeries::new(
            vec![5.0, 5.0],
            vec![1.0, 1.0],
            vec![Some(1.0), Some(2.0)],
        ))
        .unwrap_err();
    assert!(matches!(err, KmlError::Config(_)));
}
