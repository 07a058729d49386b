use log::debug;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlElement};
use yew::prelude::*;
use yew_router::prelude::*;

use crate::components::particles::ParticleBackground;
use crate::components::typing::TypingText;
use crate::Route;

/// Share of the viewport, from the top, that an element must enter before
/// it is revealed.
pub const REVEAL_THRESHOLD: f64 = 0.85;

pub fn should_reveal(element_top: f64, viewport_height: f64) -> bool {
    element_top < viewport_height * REVEAL_THRESHOLD
}

fn reveal_visible_sections() {
    let Some(window) = web_sys::window() else {
        return;
    };
    let Some(document) = window.document() else {
        return;
    };
    let viewport_height = window
        .inner_height()
        .ok()
        .and_then(|h| h.as_f64())
        .unwrap_or(0.0);
    let Ok(pending) = document.query_selector_all(".reveal:not(.visible)") else {
        return;
    };
    for i in 0..pending.length() {
        let Some(element) = pending.item(i).and_then(|n| n.dyn_into::<Element>().ok()) else {
            continue;
        };
        if should_reveal(element.get_bounding_client_rect().top(), viewport_height) {
            let _ = element.class_list().add_1("visible");
        }
    }
}

struct Service {
    icon: &'static str,
    title: &'static str,
    body: &'static str,
}

const SERVICES: &[Service] = &[
    Service {
        icon: "🎨",
        title: "Brand websites",
        body: "Custom layouts that look like you, not like a template.",
    },
    Service {
        icon: "🛒",
        title: "Online shops",
        body: "Storefronts with payments, stock and shipping wired in.",
    },
    Service {
        icon: "📱",
        title: "Responsive by default",
        body: "Every page is designed for phones first and scales up.",
    },
    Service {
        icon: "⚡",
        title: "Care & hosting",
        body: "Updates, backups and speed tuning after launch.",
    },
];

const PORTFOLIO: &[(&str, &str)] = &[
    ("Seoul Bakery Co.", "Brand site · Online orders"),
    ("Mint Dental", "Booking · Multilingual"),
    ("Hanok Stay", "Landing page · Reservations"),
    ("Orbit Labs", "Web app · Dashboard"),
    ("Studio Rue", "Portfolio · CMS"),
    ("Green Table", "Online shop · Subscriptions"),
];

const PROCESS: &[(&str, &str)] = &[
    ("Consult", "We listen to your goals and send a free estimate."),
    ("Design", "Wireframes and visual drafts until it feels right."),
    ("Build", "Development with a preview link you can click through."),
    ("Launch", "Go live, then we keep an eye on it with you."),
];

#[function_component(Home)]
pub fn home() -> Html {
    {
        use_effect_with_deps(
            move |_| {
                let window = web_sys::window();
                if let Some(window) = &window {
                    window.scroll_to_with_x_and_y(0.0, 0.0);
                }
                reveal_visible_sections();

                let listener = window.as_ref().map(|window| {
                    let scroll_callback = Closure::wrap(Box::new(reveal_visible_sections) as Box<dyn FnMut()>);
                    let _ = window.add_event_listener_with_callback(
                        "scroll",
                        scroll_callback.as_ref().unchecked_ref(),
                    );
                    scroll_callback
                });
                if listener.is_none() {
                    debug!("No window, scroll reveal disabled");
                }

                move || {
                    if let (Some(window), Some(scroll_callback)) = (window, listener) {
                        let _ = window.remove_event_listener_with_callback(
                            "scroll",
                            scroll_callback.as_ref().unchecked_ref(),
                        );
                    }
                }
            },
            (),
        );
    }

    let scroll_to_services = Callback::from(|e: MouseEvent| {
        e.prevent_default();
        if let Some(section) = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id("services"))
            .and_then(|el| el.dyn_into::<HtmlElement>().ok())
        {
            section.scroll_into_view();
        }
    });

    let phrases = vec![
        "websites that sell.".to_string(),
        "shops that convert.".to_string(),
        "brands people remember.".to_string(),
    ];

    html! {
        <div class="landing-page">
            <style>
                {r#"
                    .landing-page {
                        position: relative;
                        color: #fff;
                        background: #0b0b14;
                        overflow-x: hidden;
                    }
                    .particle-canvas {
                        position: fixed;
                        inset: 0;
                        z-index: 0;
                        pointer-events: none;
                    }
                    .landing-page section {
                        position: relative;
                        z-index: 1;
                        padding: 6rem 2rem;
                        max-width: 1200px;
                        margin: 0 auto;
                    }
                    .hero {
                        min-height: 100vh;
                        display: flex;
                        flex-direction: column;
                        justify-content: center;
                        align-items: flex-start;
                    }
                    .hero h1 {
                        font-size: 3.5rem;
                        line-height: 1.15;
                        margin-bottom: 1.5rem;
                    }
                    .hero .typed {
                        background: linear-gradient(45deg, #00D4FF, #7B61FF);
                        -webkit-background-clip: text;
                        -webkit-text-fill-color: transparent;
                    }
                    .typing-cursor {
                        margin-left: 2px;
                        color: #00D4FF;
                        -webkit-text-fill-color: #00D4FF;
                        animation: blink 1s steps(1) infinite;
                    }
                    @keyframes blink {
                        50% { opacity: 0; }
                    }
                    .hero p {
                        font-size: 1.25rem;
                        color: rgba(255, 255, 255, 0.7);
                        max-width: 560px;
                        margin-bottom: 2.5rem;
                    }
                    .hero-buttons {
                        display: flex;
                        gap: 1rem;
                        flex-wrap: wrap;
                    }
                    .cta-button, .ghost-button {
                        padding: 1rem 2rem;
                        border-radius: 12px;
                        font-size: 1.05rem;
                        font-weight: 600;
                        text-decoration: none;
                        transition: transform 0.2s ease, box-shadow 0.2s ease;
                    }
                    .cta-button {
                        color: #0b0b14;
                        background: linear-gradient(45deg, #00D4FF, #7B61FF);
                    }
                    .cta-button:hover {
                        transform: translateY(-3px);
                        box-shadow: 0 12px 32px rgba(0, 212, 255, 0.35);
                    }
                    .ghost-button {
                        color: #fff;
                        border: 1px solid rgba(255, 255, 255, 0.3);
                        background: transparent;
                        cursor: pointer;
                    }
                    .ghost-button:hover {
                        border-color: #00D4FF;
                    }
                    .section-title {
                        font-size: 2.4rem;
                        margin-bottom: 3rem;
                        text-align: center;
                    }
                    .card-grid {
                        display: grid;
                        grid-template-columns: repeat(auto-fit, minmax(240px, 1fr));
                        gap: 1.5rem;
                    }
                    .service-card, .portfolio-card, .process-step {
                        padding: 2rem;
                        border-radius: 16px;
                        background: rgba(255, 255, 255, 0.04);
                        border: 1px solid rgba(255, 255, 255, 0.08);
                        transition: transform 0.3s ease, border-color 0.3s ease, box-shadow 0.3s ease;
                    }
                    .service-card:hover, .portfolio-card:hover, .process-step:hover {
                        transform: translateY(-6px);
                        border-color: rgba(0, 212, 255, 0.4);
                        box-shadow: 0 16px 40px rgba(0, 0, 0, 0.4);
                    }
                    .service-icon {
                        font-size: 2.2rem;
                        margin-bottom: 1rem;
                    }
                    .portfolio-card {
                        min-height: 180px;
                        display: flex;
                        flex-direction: column;
                        justify-content: flex-end;
                        background: linear-gradient(160deg, rgba(123, 97, 255, 0.25), rgba(0, 212, 255, 0.08));
                    }
                    .portfolio-card span {
                        color: rgba(255, 255, 255, 0.6);
                    }
                    .process-step .step-number {
                        font-size: 0.9rem;
                        color: #00D4FF;
                        letter-spacing: 0.1em;
                    }
                    .cta-section {
                        text-align: center;
                    }
                    .reveal {
                        opacity: 0;
                        transform: translateY(40px);
                        transition: opacity 0.8s ease, transform 0.8s ease;
                    }
                    .reveal.visible {
                        opacity: 1;
                        transform: translateY(0);
                    }
                    @media (max-width: 768px) {
                        .hero h1 {
                            font-size: 2.4rem;
                        }
                        .landing-page section {
                            padding: 4rem 1.25rem;
                        }
                    }
                "#}
            </style>
            <ParticleBackground />

            <section class="hero">
                <h1>
                    {"We design "}<br />
                    <span class="typed"><TypingText phrases={phrases} /></span>
                </h1>
                <p>{"A small studio building fast, good-looking websites for growing businesses."}</p>
                <div class="hero-buttons">
                    <Link<Route> to={Route::Estimate} classes="cta-button">
                        {"Get a free estimate"}
                    </Link<Route>>
                    <button class="ghost-button" onclick={scroll_to_services}>{"See what we do"}</button>
                </div>
            </section>

            <section id="services" class="reveal">
                <h2 class="section-title">{"Services"}</h2>
                <div class="card-grid">
                    { for SERVICES.iter().map(|s| html! {
                        <div class="service-card">
                            <div class="service-icon">{ s.icon }</div>
                            <h3>{ s.title }</h3>
                            <p>{ s.body }</p>
                        </div>
                    }) }
                </div>
            </section>

            <section id="portfolio" class="reveal">
                <h2 class="section-title">{"Recent work"}</h2>
                <div class="card-grid">
                    { for PORTFOLIO.iter().map(|(client, scope)| html! {
                        <div class="portfolio-card">
                            <h3>{ *client }</h3>
                            <span>{ *scope }</span>
                        </div>
                    }) }
                </div>
            </section>

            <section id="process" class="reveal">
                <h2 class="section-title">{"How we work"}</h2>
                <div class="card-grid">
                    { for PROCESS.iter().enumerate().map(|(i, (step, body))| html! {
                        <div class="process-step">
                            <div class="step-number">{ format!("STEP {:02}", i + 1) }</div>
                            <h3>{ *step }</h3>
                            <p>{ *body }</p>
                        </div>
                    }) }
                </div>
            </section>

            <section id="contact" class="cta-section reveal">
                <h2 class="section-title">{"Ready to start?"}</h2>
                <p>{"Tell us about your project and get an estimate within one business day."}</p>
                <br />
                <Link<Route> to={Route::Estimate} classes="cta-button">
                    {"Request an estimate"}
                </Link<Route>>
            </section>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reveal_inside_lower_threshold() {
        assert!(should_reveal(500.0, 1000.0));
        assert!(should_reveal(-200.0, 1000.0));
    }

    #[test]
    fn test_no_reveal_below_threshold() {
        assert!(!should_reveal(850.0, 1000.0));
        assert!(!should_reveal(1200.0, 1000.0));
    }
}
