//! Derived Views
//!
//! Each view is a pure filter of the shared dataset for the current control
//! values, plus the figure that charts it. A selection with no matching rows
//! yields an empty view and an empty chart.

use std::collections::HashMap;

use super::figure::{
    Axis, AxisType, Figure, FigureLayout, Geo, Marker, MarkerColor, Projection, Trace, TraceKind,
    Values, SERIES_COLORS,
};
use crate::dataset::{Dataset, JoinedRow, Metric, MetricsRow};

/// Largest marker diameter on the geo chart, in pixels
const GEO_SIZE_MAX: f64 = 20.0;
const GEO_SIZE_MIN: f64 = 4.0;
const GEO_HEIGHT: u32 = 500;

/// Joined rows of one year, for the map
#[derive(Debug, Clone)]
pub struct GeoView<'a> {
    pub year: i32,
    pub rows: Vec<&'a JoinedRow>,
}

/// Joined rows where `year == selected_year`
pub fn geo_view(dataset: &Dataset, year: i32) -> GeoView<'_> {
    GeoView {
        year,
        rows: dataset.joined().iter().filter(|r| r.year() == year).collect(),
    }
}

impl GeoView<'_> {
    /// Map scatter sized by population, colored by suicide rate
    pub fn figure(&self) -> Figure {
        let population: Vec<f64> = self.rows.iter().map(|r| r.population).collect();
        let max_population = population
            .iter()
            .copied()
            .filter(|p| p.is_finite())
            .fold(0.0_f64, f64::max);
        let sizeref = if max_population > 0.0 {
            2.0 * max_population / (GEO_SIZE_MAX * GEO_SIZE_MAX)
        } else {
            1.0
        };

        let mut marker = Marker::continuous(
            self.rows.iter().map(|r| r.metrics.suicide_rate).collect(),
            Metric::SuicideRate.key(),
        );
        marker.size = Some(population);
        marker.sizemode = Some("area");
        marker.sizeref = Some(sizeref);
        marker.sizemin = Some(GEO_SIZE_MIN);

        let mut trace = Trace::new(TraceKind::Scattergeo);
        trace.lat = Some(self.rows.iter().map(|r| r.latitude).collect());
        trace.lon = Some(self.rows.iter().map(|r| r.longitude).collect());
        trace.hovertext = Some(self.rows.iter().map(|r| r.country().to_string()).collect());
        trace.customdata = Some(
            self.rows
                .iter()
                .map(|r| {
                    vec![
                        r.metrics.prevalence_in_males,
                        r.metrics.prevalence_in_females,
                        Some(r.metrics.prevalence),
                    ]
                })
                .collect(),
        );
        trace.hovertemplate = Some(
            "<b>%{hovertext}</b><br>\
             population=%{marker.size}<br>\
             suicide_rate=%{marker.color}<br>\
             prevalence_in_males=%{customdata[0]}<br>\
             prevalence_in_females=%{customdata[1]}<br>\
             prevalence=%{customdata[2]}<extra></extra>"
                .to_string(),
        );
        trace.marker = Some(marker);

        Figure::new(
            trace,
            FigureLayout {
                geo: Some(Geo {
                    projection: Projection {
                        kind: "natural earth",
                    },
                    showcountries: true,
                }),
                height: Some(GEO_HEIGHT),
                ..Default::default()
            },
        )
    }
}

/// Every metrics row against one metric, colored by year
#[derive(Debug, Clone)]
pub struct ColumnScatter<'a> {
    pub metric: Metric,
    pub rows: Vec<&'a MetricsRow>,
}

/// All metrics rows; no filtering
pub fn column_scatter(dataset: &Dataset, metric: Metric) -> ColumnScatter<'_> {
    ColumnScatter {
        metric,
        rows: dataset.metrics().iter().collect(),
    }
}

impl ColumnScatter<'_> {
    pub fn figure(&self) -> Figure {
        let mut trace = Trace::new(TraceKind::Scatter);
        trace.mode = Some("markers");
        trace.x = Some(countries(&self.rows));
        trace.y = Some(values(&self.rows, self.metric));
        trace.customdata = Some(
            self.rows
                .iter()
                .map(|r| vec![Some(f64::from(r.year))])
                .collect(),
        );
        trace.hovertemplate = Some(format!(
            "country=%{{x}}<br>{}=%{{y}}<br>year=%{{customdata[0]}}<extra></extra>",
            self.metric.key()
        ));
        trace.marker = Some(Marker::continuous(
            self.rows.iter().map(|r| f64::from(r.year)).collect(),
            "year",
        ));

        Figure::new(
            trace,
            FigureLayout {
                xaxis: Some(Axis::new("country", AxisType::Category)),
                yaxis: Some(Axis::new(self.metric.key(), AxisType::Log)),
                ..Default::default()
            },
        )
    }
}

/// One bar per country for a single year
#[derive(Debug, Clone)]
pub struct BarView<'a> {
    pub metric: Metric,
    pub year: i32,
    pub rows: Vec<&'a MetricsRow>,
}

/// Metrics rows where `year == selected_year`
pub fn bar_view(dataset: &Dataset, metric: Metric, year: i32) -> BarView<'_> {
    BarView {
        metric,
        year,
        rows: dataset.metrics().iter().filter(|r| r.year == year).collect(),
    }
}

impl BarView<'_> {
    pub fn figure(&self) -> Figure {
        let mut palette: HashMap<&str, &str> = HashMap::new();
        let colors = self
            .rows
            .iter()
            .map(|r| {
                let next = SERIES_COLORS[palette.len() % SERIES_COLORS.len()];
                palette.entry(r.country.as_str()).or_insert(next).to_string()
            })
            .collect();

        let mut trace = Trace::new(TraceKind::Bar);
        trace.x = Some(countries(&self.rows));
        trace.y = Some(values(&self.rows, self.metric));
        trace.customdata = Some(
            self.rows
                .iter()
                .map(|r| vec![Some(f64::from(r.year))])
                .collect(),
        );
        trace.hovertemplate = Some(format!(
            "country=%{{x}}<br>{}=%{{y}}<br>year=%{{customdata[0]}}<extra></extra>",
            self.metric.key()
        ));
        trace.marker = Some(Marker {
            color: Some(MarkerColor::PerPoint(colors)),
            ..Default::default()
        });

        Figure::new(
            trace,
            FigureLayout {
                xaxis: Some(Axis::new("country", AxisType::Category)),
                yaxis: Some(Axis::new(self.metric.key(), AxisType::Linear)),
                showlegend: Some(false),
                ..Default::default()
            },
        )
    }
}

/// One country's metric over time
#[derive(Debug, Clone)]
pub struct LineView<'a> {
    pub metric: Metric,
    pub country: String,
    pub rows: Vec<&'a MetricsRow>,
}

/// Metrics rows where `country == selected_country`, ascending by year
pub fn line_view<'a>(dataset: &'a Dataset, metric: Metric, country: &str) -> LineView<'a> {
    let mut rows: Vec<&MetricsRow> = dataset
        .metrics()
        .iter()
        .filter(|r| r.country == country)
        .collect();
    rows.sort_by_key(|r| r.year);

    LineView {
        metric,
        country: country.to_string(),
        rows,
    }
}

impl LineView<'_> {
    pub fn figure(&self) -> Figure {
        let mut trace = Trace::new(TraceKind::Scatter);
        trace.mode = Some("lines");
        trace.x = Some(Values::Numbers(
            self.rows.iter().map(|r| f64::from(r.year)).collect(),
        ));
        trace.y = Some(values(&self.rows, self.metric));
        trace.hovertext = Some(self.rows.iter().map(|r| r.country.clone()).collect());
        trace.hovertemplate = Some(format!(
            "year=%{{x}}<br>{}=%{{y}}<br>country=%{{hovertext}}<extra></extra>",
            self.metric.key()
        ));

        Figure::new(
            trace,
            FigureLayout {
                xaxis: Some(Axis::new("year", AxisType::Linear)),
                yaxis: Some(Axis::new(self.metric.key(), AxisType::Log)),
                showlegend: Some(false),
                ..Default::default()
            },
        )
    }
}

fn countries(rows: &[&MetricsRow]) -> Values {
    Values::Text(rows.iter().map(|r| r.country.clone()).collect())
}

fn values(rows: &[&MetricsRow], metric: Metric) -> Vec<f64> {
    rows.iter().map(|r| r.value(metric)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::CoordinateRow;
    use std::collections::HashSet;

    fn sample() -> Dataset {
        Dataset::from_tables(
            vec![
                MetricsRow::new("US", 2016, 2.0),
                MetricsRow::new("US", 2015, 1.0),
                MetricsRow::new("FR", 2015, 3.0),
            ],
            &[
                CoordinateRow::new("US", 38.0, -97.0, 331e6),
                CoordinateRow::new("FR", 46.2, 2.2, 67e6),
            ],
        )
    }

    fn keys<'a>(rows: impl IntoIterator<Item = &'a MetricsRow>) -> HashSet<(String, i32)> {
        rows.into_iter()
            .map(|r| (r.country.clone(), r.year))
            .collect()
    }

    #[test]
    fn test_geo_view_filters_year() {
        let ds = sample();
        let view = geo_view(&ds, 2015);

        assert!(view.rows.iter().all(|r| r.year() == 2015));
        let expected: HashSet<(String, i32)> =
            [("US".to_string(), 2015), ("FR".to_string(), 2015)].into();
        assert_eq!(keys(view.rows.iter().map(|r| &r.metrics)), expected);
    }

    #[test]
    fn test_geo_view_absent_year_is_empty() {
        let ds = sample();
        let view = geo_view(&ds, 1800);
        assert!(view.rows.is_empty());

        let fig = view.figure();
        assert_eq!(fig.point_count(), 0);
        assert_eq!(fig.data[0].marker.as_ref().unwrap().sizeref, Some(1.0));
    }

    #[test]
    fn test_geo_figure_sizing() {
        let ds = sample();
        let fig = geo_view(&ds, 2015).figure();
        let marker = fig.data[0].marker.as_ref().unwrap();

        assert_eq!(fig.data[0].kind, TraceKind::Scattergeo);
        assert_eq!(marker.sizemode, Some("area"));
        assert_eq!(marker.sizeref, Some(2.0 * 331e6 / 400.0));
        assert_eq!(fig.layout.height, Some(500));
        assert_eq!(
            fig.data[0].hovertext.as_deref(),
            Some(&["US".to_string(), "FR".to_string()][..])
        );
    }

    #[test]
    fn test_column_scatter_keeps_every_row() {
        let ds = sample();
        let view = column_scatter(&ds, Metric::SuicideRate);
        assert_eq!(view.rows.len(), ds.metrics().len());

        let fig = view.figure();
        assert_eq!(fig.point_count(), 3);
        assert_eq!(fig.layout.yaxis.as_ref().unwrap().kind, AxisType::Log);
    }

    #[test]
    fn test_bar_view_one_row_per_country() {
        let ds = sample();
        let view = bar_view(&ds, Metric::Prevalence, 2015);

        let distinct: HashSet<&str> = ds
            .metrics()
            .iter()
            .filter(|r| r.year == 2015)
            .map(|r| r.country.as_str())
            .collect();
        assert_eq!(view.rows.len(), distinct.len());
        assert!(bar_view(&ds, Metric::Prevalence, 1800).rows.is_empty());
    }

    #[test]
    fn test_bar_colors_per_country() {
        let ds = sample();
        let fig = bar_view(&ds, Metric::Prevalence, 2015).figure();
        match fig.data[0].marker.as_ref().unwrap().color.as_ref().unwrap() {
            MarkerColor::PerPoint(colors) => {
                assert_eq!(colors.len(), 2);
                assert_ne!(colors[0], colors[1]);
            }
            other => panic!("unexpected color channel: {:?}", other),
        }
        assert_eq!(fig.layout.showlegend, Some(false));

        // Legend visibility lives on the layout only
        let json = serde_json::to_value(&fig).unwrap();
        assert_eq!(json["layout"]["showlegend"], false);
        assert!(json["data"][0].get("showlegend").is_none());
    }

    #[test]
    fn test_line_view_sorted_single_country() {
        let ds = sample();
        let view = line_view(&ds, Metric::Prevalence, "US");

        assert!(view.rows.iter().all(|r| r.country == "US"));
        let years: Vec<i32> = view.rows.iter().map(|r| r.year).collect();
        assert_eq!(years, vec![2015, 2016]);

        let fig = view.figure();
        assert_eq!(fig.data[0].y, Some(vec![1.0, 2.0]));
        assert_eq!(fig.data[0].x, Some(Values::Numbers(vec![2015.0, 2016.0])));
    }

    #[test]
    fn test_line_view_unknown_country_is_empty() {
        let ds = sample();
        assert!(line_view(&ds, Metric::Prevalence, "Atlantis").rows.is_empty());
    }
}
