use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{js_sys, CanvasRenderingContext2d, HtmlCanvasElement};
use yew::prelude::*;
use yew_hooks::prelude::*;

#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
    pub x: f64,
    pub y: f64,
    pub vx: f64,
    pub vy: f64,
    pub radius: f64,
}

/// Drifting points that bounce inside a `width` x `height` box.
#[derive(Clone, Debug, PartialEq)]
pub struct ParticleField {
    pub width: f64,
    pub height: f64,
    pub particles: Vec<Particle>,
}

impl ParticleField {
    /// `random` must yield values in `[0, 1)`.
    pub fn new(count: usize, width: f64, height: f64, mut random: impl FnMut() -> f64) -> Self {
        let particles = (0..count)
            .map(|_| Particle {
                x: random() * width,
                y: random() * height,
                vx: (random() - 0.5) * 0.8,
                vy: (random() - 0.5) * 0.8,
                radius: 1.0 + random() * 2.0,
            })
            .collect();
        Self { width, height, particles }
    }

    pub fn resize(&mut self, width: f64, height: f64) {
        self.width = width;
        self.height = height;
        for p in &mut self.particles {
            p.x = p.x.min(width);
            p.y = p.y.min(height);
        }
    }

    pub fn step(&mut self) {
        for p in &mut self.particles {
            p.x += p.vx;
            p.y += p.vy;
            if p.x < 0.0 || p.x > self.width {
                p.vx = -p.vx;
                p.x = p.x.clamp(0.0, self.width);
            }
            if p.y < 0.0 || p.y > self.height {
                p.vy = -p.vy;
                p.y = p.y.clamp(0.0, self.height);
            }
        }
    }

    /// Index pairs closer than `max_distance`, with a line opacity that
    /// falls linearly to zero at that distance.
    pub fn links(&self, max_distance: f64) -> Vec<(usize, usize, f64)> {
        let mut links = Vec::new();
        for (i, a) in self.particles.iter().enumerate() {
            for (j, b) in self.particles.iter().enumerate().skip(i + 1) {
                let distance = ((a.x - b.x).powi(2) + (a.y - b.y).powi(2)).sqrt();
                if distance < max_distance {
                    links.push((i, j, 1.0 - distance / max_distance));
                }
            }
        }
        links
    }

    fn draw(&self, ctx: &CanvasRenderingContext2d, link_distance: f64) {
        ctx.clear_rect(0.0, 0.0, self.width, self.height);

        ctx.set_fill_style(&JsValue::from_str("rgba(0, 212, 255, 0.7)"));
        for p in &self.particles {
            ctx.begin_path();
            let _ = ctx.arc(p.x, p.y, p.radius, 0.0, std::f64::consts::PI * 2.0);
            ctx.fill();
        }

        ctx.set_line_width(0.6);
        for (i, j, alpha) in self.links(link_distance) {
            let (a, b) = (&self.particles[i], &self.particles[j]);
            ctx.set_stroke_style(&JsValue::from_str(&format!("rgba(0, 212, 255, {:.3})", alpha * 0.4)));
            ctx.begin_path();
            ctx.move_to(a.x, a.y);
            ctx.line_to(b.x, b.y);
            ctx.stroke();
        }
    }
}

fn viewport() -> (f64, f64) {
    web_sys::window()
        .map(|w| {
            let width = w.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(1280.0);
            let height = w.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(720.0);
            (width, height)
        })
        .unwrap_or((1280.0, 720.0))
}

fn context_2d(canvas: &HtmlCanvasElement) -> Option<CanvasRenderingContext2d> {
    canvas
        .get_context("2d")
        .ok()
        .flatten()
        .and_then(|ctx| ctx.dyn_into::<CanvasRenderingContext2d>().ok())
}

#[derive(Properties, PartialEq)]
pub struct ParticleBackgroundProps {
    #[prop_or(70)]
    pub count: usize,
    #[prop_or(120.0)]
    pub link_distance: f64,
}

#[function_component(ParticleBackground)]
pub fn particle_background(props: &ParticleBackgroundProps) -> Html {
    let canvas_ref = use_node_ref();
    let field = use_mut_ref(|| {
        let (width, height) = viewport();
        ParticleField::new(props.count, width, height, js_sys::Math::random)
    });

    // Keep the canvas the size of the window
    {
        let canvas_ref = canvas_ref.clone();
        let field = field.clone();
        use_effect_with_deps(
            move |_| {
                let fit = move || {
                    if let Some(canvas) = canvas_ref.cast::<HtmlCanvasElement>() {
                        let (width, height) = viewport();
                        canvas.set_width(width as u32);
                        canvas.set_height(height as u32);
                        field.borrow_mut().resize(width, height);
                    }
                };
                fit();

                let window = web_sys::window();
                let listener = window.as_ref().map(|window| {
                    let callback = Closure::<dyn FnMut()>::new(fit);
                    let _ = window.add_event_listener_with_callback(
                        "resize",
                        callback.as_ref().unchecked_ref(),
                    );
                    callback
                });

                move || {
                    if let (Some(window), Some(callback)) = (window, listener) {
                        let _ = window.remove_event_listener_with_callback(
                            "resize",
                            callback.as_ref().unchecked_ref(),
                        );
                    }
                }
            },
            (),
        );
    }

    {
        let canvas_ref = canvas_ref.clone();
        let field = field.clone();
        let link_distance = props.link_distance;
        use_interval(
            move || {
                let Some(canvas) = canvas_ref.cast::<HtmlCanvasElement>() else {
                    return;
                };
                if let Some(ctx) = context_2d(&canvas) {
                    let mut field = field.borrow_mut();
                    field.step();
                    field.draw(&ctx, link_distance);
                }
            },
            33,
        );
    }

    html! {
        <canvas ref={canvas_ref} class="particle-canvas" aria-hidden="true"></canvas>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn still(x: f64, y: f64) -> Particle {
        Particle { x, y, vx: 0.0, vy: 0.0, radius: 1.0 }
    }

    #[test]
    fn test_new_places_particles_inside_the_box() {
        let mut seed = 0.0;
        let field = ParticleField::new(10, 200.0, 100.0, || {
            seed = (seed + 0.37) % 1.0;
            seed
        });
        assert_eq!(field.particles.len(), 10);
        assert!(field
            .particles
            .iter()
            .all(|p| (0.0..=200.0).contains(&p.x) && (0.0..=100.0).contains(&p.y)));
    }

    #[test]
    fn test_step_bounces_off_edges() {
        let mut field = ParticleField {
            width: 100.0,
            height: 100.0,
            particles: vec![Particle { x: 99.5, y: 0.2, vx: 1.0, vy: -0.5, radius: 1.0 }],
        };
        field.step();
        let p = &field.particles[0];
        assert_eq!(p.x, 100.0);
        assert_eq!(p.y, 0.0);
        assert_eq!(p.vx, -1.0);
        assert_eq!(p.vy, 0.5);
    }

    #[test]
    fn test_links_fade_with_distance() {
        let field = ParticleField {
            width: 500.0,
            height: 500.0,
            particles: vec![still(0.0, 0.0), still(60.0, 0.0), still(400.0, 400.0)],
        };
        let links = field.links(120.0);
        assert_eq!(links.len(), 1);
        let (i, j, alpha) = links[0];
        assert_eq!((i, j), (0, 1));
        assert!((alpha - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_resize_pulls_particles_inside() {
        let mut field = ParticleField {
            width: 500.0,
            height: 500.0,
            particles: vec![still(450.0, 480.0)],
        };
        field.resize(300.0, 200.0);
        assert_eq!(field.particles[0], still(300.0, 200.0));
    }
}
