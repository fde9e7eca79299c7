#![cfg(feature = "web")]
use crate::record::Feature;
use crate::series::FeatureSeries;
use image::{DynamicImage, ImageOutputFormat, RgbImage};
use plotters::prelude::*;
use std::io::Cursor;

/// Configuration options for chart rendering
///
/// This structure contains the customizable properties of the rendered
/// distribution chart.
#[derive(Clone, Debug)]
pub struct GraphOptions {
    /// Title displayed at the top of the chart
    pub title: String,

    /// Label for the X-axis
    pub x_label: String,

    /// Label for the Y-axis
    pub y_label: String,

    /// Width of the chart in pixels
    pub width: u32,

    /// Height of the chart in pixels
    pub height: u32,
}

impl GraphOptions {
    /// Labels matching the violin payload of the given feature.
    pub fn for_feature(feature: Feature) -> Self {
        Self {
            title: format!("Violin plot of {}", feature.name()),
            x_label: "Crop".to_string(),
            y_label: feature.name().to_string(),
            ..Self::default()
        }
    }
}

impl Default for GraphOptions {
    /// Creates a default configuration: 1200x600 pixels with generic labels.
    fn default() -> Self {
        Self {
            title: "Distribution".to_string(),
            x_label: "Crop".to_string(),
            y_label: "Value".to_string(),
            width: 1200,
            height: 600,
        }
    }
}

/// Renders per-crop distributions as a box plot PNG
///
/// Draws one box (quartiles and whiskers) per crop, in series order, into
/// an in-memory bitmap and encodes it as PNG.
///
/// # Arguments
/// * `series` - Per-crop values, as produced by the series builder
/// * `options` - Chart styling options
///
/// # Returns
/// * A Result containing the PNG image data as bytes or an error
pub fn render_box_plot(
    series: &[FeatureSeries],
    options: &GraphOptions,
) -> Result<Vec<u8>, Box<dyn std::error::Error>> {
    if series.is_empty() {
        return Err("Nothing to plot".into());
    }

    let (width, height) = (options.width, options.height);
    let mut pixels = vec![0u8; (width * height * 3) as usize];

    let crops: Vec<String> = series.iter().map(|s| s.crop.clone()).collect();
    let (low, high) = value_bounds(series);

    {
        let root = BitMapBackend::with_buffer(&mut pixels, (width, height)).into_drawing_area();
        root.fill(&WHITE)?;

        let mut chart = ChartBuilder::on(&root)
            .caption(&options.title, ("sans-serif", 30).into_font())
            .margin(10)
            .x_label_area_size(40)
            .y_label_area_size(60)
            .build_cartesian_2d(crops[..].into_segmented(), low as f32..high as f32)?;

        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_desc(&options.x_label)
            .y_desc(&options.y_label)
            .draw()?;

        chart.draw_series(
            series
                .iter()
                .filter(|s| !s.values.is_empty())
                .map(|s| {
                    let quartiles = Quartiles::new(&s.values);
                    Boxplot::new_vertical(SegmentValue::CenterOf(&s.crop), &quartiles)
                        .width(12)
                        .whisker_width(0.5)
                        .style(BLUE)
                }),
        )?;

        root.present()?;
    }

    let frame = RgbImage::from_raw(width, height, pixels).ok_or("Chart buffer size mismatch")?;
    let mut png = Vec::new();
    DynamicImage::ImageRgb8(frame).write_to(&mut Cursor::new(&mut png), ImageOutputFormat::Png)?;
    Ok(png)
}

/// Y-axis range covering every value with a 5% margin.
///
/// Falls back to `0..1` when there is nothing to draw.
pub fn value_bounds(series: &[FeatureSeries]) -> (f64, f64) {
    let (min, max) = series
        .iter()
        .flat_map(|s| s.values.iter().copied())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        });

    if !min.is_finite() || !max.is_finite() {
        return (0.0, 1.0);
    }

    let pad = ((max - min) * 0.05).max(0.5);
    (min - pad, max + pad)
}
