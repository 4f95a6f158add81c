use std::error::Error;

use plotters::prelude::*;

use super::Series;

/// Plot the true signal against the prediction into a png file
pub fn plot(
    targets: &Series,
    test_preds: &Series,
    filename: &str,
    dims: (u32, u32),
) -> Result<(), Box<dyn Error>> {
    info!("n_targets: {}, n_test_preds: {}", targets.len(), test_preds.len());
    if targets.is_empty() {
        warn!("nothing to plot into {}", filename);
        return Ok(());
    }

    let ts_min = targets[0].0;
    let mut ts_max = targets[targets.len() - 1].0;
    if ts_max <= ts_min {
        ts_max = ts_min + 1.0;
    }
    let mut target_min: f64 = targets[0].1;
    let mut target_max: f64 = targets[0].1;
    for t in targets.iter().chain(test_preds.iter()) {
        if !t.1.is_finite() {
            continue;
        }
        if t.1 < target_min {
            target_min = t.1;
        }
        if t.1 > target_max {
            target_max = t.1;
        }
    }
    if target_max - target_min < f64::EPSILON {
        target_min -= 0.5;
        target_max += 0.5;
    }
    debug!("target_min: {}, target_max: {}", target_min, target_max);

    let root_area = BitMapBackend::new(filename, dims).into_drawing_area();
    root_area.fill(&WHITE)?;
    let root_area = root_area.titled(filename, ("sans-serif", 20).into_font())?;

    let mut cc0 = ChartBuilder::on(&root_area)
        .margin(5)
        .set_all_label_area_size(50)
        .caption("values", ("sans-serif", 30).into_font().with_color(&BLACK))
        .build_cartesian_2d(ts_min..ts_max, target_min..target_max)?;
    cc0.configure_mesh()
        .x_labels(20)
        .y_labels(20)
        .x_label_formatter(&|v| format!("{:.0}", v))
        .y_label_formatter(&|v| format!("{:.4}", v))
        .draw()?;

    cc0.draw_series(LineSeries::new(targets.clone(), &BLACK))?
        .label("signal")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], &BLACK));
    cc0.draw_series(LineSeries::new(test_preds.clone(), &RED))?
        .label("prediction")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], &RED));
    cc0.configure_series_labels().border_style(&BLACK).draw()?;
    root_area.present()?;

    info!("successfully plotted to {}", filename);

    Ok(())
}
