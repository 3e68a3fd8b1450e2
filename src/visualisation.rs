// src/visualisation.rs

use plotters::prelude::*;

use crate::honeycomb::{HoneycombSpins, Sublattice};
use crate::spin_field::SpinField;

/// Map S_z to a blue–white–red colour using a *local* min/max,
/// so small variations are still visible.
///
/// min_sz maps to blue, max_sz maps to red, midpoint to white.
fn sz_to_color(sz: f64, min_sz: f64, max_sz: f64) -> RGBColor {
    // Protect against min ≈ max (e.g. perfectly uniform state)
    let mut lo = min_sz;
    let mut hi = max_sz;
    if !lo.is_finite() || !hi.is_finite() || (hi - lo).abs() < 1e-9 {
        lo = -1.0;
        hi = 1.0;
    }

    let x = ((sz - lo) / (hi - lo)).clamp(0.0, 1.0);

    // blue–white–red: x=0 -> blue, x=0.5 -> white, x=1 -> red
    let r = (255.0 * x) as u8;
    let b = (255.0 * (1.0 - x)) as u8;
    let g = (255.0 * (1.0 - (2.0 * (x - 0.5).abs()))).clamp(0.0, 255.0) as u8;

    RGBColor(r, g, b)
}

fn finite_min_max(values: impl Iterator<Item = f64>) -> (f64, f64) {
    let mut lo = f64::INFINITY;
    let mut hi = f64::NEG_INFINITY;
    for v in values {
        if v.is_finite() {
            if v < lo {
                lo = v;
            }
            if v > hi {
                hi = v;
            }
        }
    }
    if !lo.is_finite() || !hi.is_finite() {
        (-1.0, 1.0)
    } else {
        (lo, hi)
    }
}

/// Save the z-component of the spin field as a PNG plot with axes and labels.
/// - x/y axes are site indices
/// - colour encodes S_z (blue ≈ min, white ≈ mid, red ≈ max)
pub fn save_sz_plot(
    field: &SpinField,
    filename: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let nx = field.grid.nx as i32;
    let ny = field.grid.ny as i32;

    let (min_sz, max_sz) = finite_min_max(field.data.iter().map(|s| s[2]));

    let root = BitMapBackend::new(filename, (800, 800)).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .margin(40)
        .caption(
            "S_z field (blue = min, white = mid, red = max)",
            ("sans-serif", 20),
        )
        .x_label_area_size(40)
        .y_label_area_size(40)
        .build_cartesian_2d(0..nx, 0..ny)?;

    chart
        .configure_mesh()
        .x_desc("x (site index)")
        .y_desc("y (site index)")
        .axis_desc_style(("sans-serif", 15))
        .draw()?;

    // Draw one coloured rectangle per site
    chart.draw_series(
        (0..nx).flat_map(|i| {
            (0..ny).map(move |j| {
                let idx = field.idx(i as usize, j as usize);
                let sz = field.data[idx][2];
                let color = sz_to_color(sz, min_sz, max_sz);
                Rectangle::new([(i, j), (i + 1, j + 1)], color.filled())
            })
        }),
    )?;

    root.present()?;
    Ok(())
}

/// Plot total energy versus Metropolis iteration.
pub fn save_energy_history_plot(
    iterations: &[usize],
    energies: &[f64],
    filename: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    if iterations.is_empty() || iterations.len() != energies.len() {
        return Ok(()); // nothing to plot
    }

    let (mut y_min, mut y_max) = finite_min_max(energies.iter().copied());
    if (y_max - y_min).abs() < 1e-30 {
        // all values essentially identical; broaden the window
        let delta = if y_max.abs() < 1e-30 {
            1.0
        } else {
            0.1 * y_max.abs()
        };
        y_min -= delta;
        y_max += delta;
    } else {
        // add a 10% margin around the data range
        let margin = 0.1 * (y_max - y_min);
        y_min -= margin;
        y_max += margin;
    }

    let x_max = *iterations.last().unwrap() as f64;

    let root = BitMapBackend::new(filename, (1024, 768)).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .margin(20)
        .caption("Total energy vs iteration", ("sans-serif", 30))
        .set_left_and_bottom_label_area_size(60)
        .build_cartesian_2d(0.0..x_max.max(1.0), y_min..y_max)?;

    chart
        .configure_mesh()
        .x_desc("iteration")
        .y_desc("energy (arb. units)")
        .x_labels(10)
        .y_labels(10)
        .label_style(("sans-serif", 16))
        .axis_desc_style(("sans-serif", 18))
        .draw()?;

    chart
        .draw_series(LineSeries::new(
            iterations
                .iter()
                .zip(energies.iter())
                .map(|(&it, &e)| (it as f64, e)),
            &BLACK,
        ))?
        .label("Total")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], &BLACK));

    chart
        .configure_series_labels()
        .border_style(&BLACK)
        .background_style(&WHITE.mix(0.8))
        .draw()?;

    root.present()?;
    Ok(())
}

/// Save a honeycomb field as a PNG: one filled circle per spin, the B
/// sublattice offset by the honeycomb basis (0.5, sqrt(3)/2), colour
/// encoding S_z as in `save_sz_plot`.
pub fn save_honeycomb_plot(
    field: &HoneycombSpins,
    filename: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let na = field.na;
    let nb = field.nb;
    let dy = 3f64.sqrt() / 2.0;

    let (min_sz, max_sz) = finite_min_max(
        field
            .data
            .iter()
            .flat_map(|cell| cell.iter().map(|s| s[2])),
    );

    let root = BitMapBackend::new(filename, (800, 800)).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .margin(40)
        .caption("Honeycomb lattice spins (colour = S_z)", ("sans-serif", 20))
        .x_label_area_size(40)
        .y_label_area_size(40)
        .build_cartesian_2d(-1.0..na as f64 + 1.0, -1.0..nb as f64 + dy + 1.0)?;

    chart
        .configure_mesh()
        .x_desc("a (cell index)")
        .y_desc("b (cell index)")
        .axis_desc_style(("sans-serif", 15))
        .draw()?;

    for (sub, (ox, oy)) in [(Sublattice::A, (0.0, 0.0)), (Sublattice::B, (0.5, dy))] {
        chart.draw_series((0..na).flat_map(|a| {
            (0..nb).map(move |b| {
                let sz = field.get(a, b, sub)[2];
                let color = sz_to_color(sz, min_sz, max_sz);
                Circle::new((a as f64 + ox, b as f64 + oy), 5, color.filled())
            })
        }))?;
    }

    root.present()?;
    Ok(())
}
