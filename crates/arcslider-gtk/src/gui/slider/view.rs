use super::GRADIENT_STEPS;
use crate::gui::theme::SliderColors;
use arcslider_core::{Geometry, Point};
use cairo::Context;
use palette::{Mix, Srgba};
use std::f64::consts::PI;

/// Wedges overlap by this much so antialiasing leaves no seams in the gradient.
const WEDGE_OVERLAP: f64 = 0.01;

fn set_source(cr: &Context, color: Srgba<f64>) {
    let (r, g, b, a) = color.into_components();
    cr.set_source_rgba(r, g, b, a);
}

struct ArcRenderer<'a> {
    center: Point,
    geometry: &'a Geometry,
}

impl<'a> ArcRenderer<'a> {
    fn new(center: Point, geometry: &'a Geometry) -> Self {
        Self { center, geometry }
    }

    fn start(&self) -> f64 {
        self.geometry.start_angle().to_radians()
    }

    fn arc_path(&self, cr: &Context, sweep: f64) {
        let start = self.start();
        cr.new_path();
        cr.arc(
            self.center.x,
            self.center.y,
            self.geometry.mid_radius,
            start,
            start + sweep,
        );
    }

    fn prepare_stroke(&self, cr: &Context) {
        cr.set_line_width(self.geometry.line_width);
        cr.set_line_cap(cairo::LineCap::Butt);
        cr.set_dash(&self.geometry.dash.segments, self.geometry.dash.phase);
    }

    /// The track fades from white at its start to the track color at its end. The whole
    /// dashed arc is stroked once per wedge, clipped to that wedge, so dashes stay continuous.
    fn draw_track(&self, cr: &Context, colors: &SliderColors) -> Result<(), cairo::Error> {
        let sweep = self.geometry.track_sweep.to_radians();
        let outer = self.geometry.mid_radius + self.geometry.line_width;
        let white = Srgba::new(1.0, 1.0, 1.0, 1.0);

        for i in 0..GRADIENT_STEPS {
            let (t0, t1) = (
                i as f64 / GRADIENT_STEPS as f64,
                (i + 1) as f64 / GRADIENT_STEPS as f64,
            );
            let a0 = self.start() + sweep * t0;
            let a1 = (self.start() + sweep * t1 + WEDGE_OVERLAP).min(self.start() + sweep);

            cr.save()?;
            cr.new_path();
            cr.move_to(self.center.x, self.center.y);
            cr.arc(self.center.x, self.center.y, outer, a0, a1);
            cr.close_path();
            cr.clip();

            set_source(cr, white.mix(colors.track, (t0 + t1) / 2.0));
            self.prepare_stroke(cr);
            self.arc_path(cr, sweep);
            cr.stroke()?;
            cr.restore()?;
        }
        Ok(())
    }

    fn draw_progress(&self, cr: &Context, colors: &SliderColors) -> Result<(), cairo::Error> {
        let sweep = self.geometry.progress_sweep.to_radians();
        if sweep <= 0.0 {
            return Ok(());
        }

        cr.save()?;
        set_source(cr, colors.progress);
        self.prepare_stroke(cr);
        self.arc_path(cr, sweep);
        cr.stroke()?;
        cr.restore()
    }

    fn draw_handle(&self, cr: &Context, colors: &SliderColors) -> Result<(), cairo::Error> {
        let offset = self.geometry.handle_center();
        set_source(cr, colors.handle);
        cr.new_path();
        cr.arc(
            self.center.x + offset.x,
            self.center.y + offset.y,
            self.geometry.handle_radius(),
            0.0,
            2.0 * PI,
        );
        cr.fill()
    }
}

pub fn draw(
    cr: &Context,
    center: Point,
    geometry: &Geometry,
    colors: &SliderColors,
) -> Result<(), cairo::Error> {
    let renderer = ArcRenderer::new(center, geometry);
    renderer.draw_track(cr, colors)?;
    renderer.draw_progress(cr, colors)?;
    renderer.draw_handle(cr, colors)
}
