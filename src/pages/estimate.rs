use gloo_timers::callback::Timeout;
use log::{debug, info, warn};
use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlInputElement;
use yew::prelude::*;
use yew_router::prelude::*;

use crate::components::file_drop::FileDrop;
use crate::components::toast::{notify, ToastAction, ToastKind, ToastQueue, ToastStack};
use crate::config::{self, EstimateConfig};
use crate::estimate::input_format::format_phone;
use crate::estimate::{
    ClientContext, DomForm, DomSurface, Draft, DraftStore, EstimatePipeline, FetchTransport,
    FieldAccessor, LocalStorageDrafts, SubmitOutcome,
};
use crate::Route;

const WEBSITE_TYPES: &[&str] = &["Brand site", "Online shop", "Landing page", "Portfolio", "Web app"];
const DESIGN_STYLES: &[&str] = &["Minimal", "Bold", "Corporate", "Playful", "Editorial"];
const FEATURES: &[&str] = &["Booking", "Blog", "Multilingual", "Members", "Payments", "CMS"];
const PAGE_COUNTS: &[&str] = &["1-5", "6-10", "11-20", "20+"];
const TIMELINES: &[&str] = &["ASAP", "1 month", "2-3 months", "Flexible"];
const INDUSTRIES: &[&str] = &["Retail", "Food & beverage", "Healthcare", "Education", "IT / SaaS", "Other"];
const BUDGETS: &[&str] = &["Under 3M KRW", "3M-5M KRW", "5M-10M KRW", "10M+ KRW", "Not sure yet"];

#[derive(Properties, PartialEq)]
pub struct FieldLabelProps {
    pub for_id: AttrValue,
    pub text: AttrValue,
    #[prop_or_default]
    pub required: bool,
}

#[function_component(FieldLabel)]
pub fn field_label(props: &FieldLabelProps) -> Html {
    html! {
        <label for={props.for_id.clone()}>
            { props.text.clone() }
            if props.required {
                <span class="required-asterisk">{" *"}</span>
            }
        </label>
    }
}

#[derive(Properties, PartialEq)]
pub struct ChoiceGroupProps {
    pub name: AttrValue,
    pub legend: AttrValue,
    pub options: &'static [&'static str],
    /// Radio buttons when set, checkboxes otherwise.
    #[prop_or_default]
    pub exclusive: bool,
    #[prop_or_default]
    pub required: bool,
}

#[function_component(ChoiceGroup)]
pub fn choice_group(props: &ChoiceGroupProps) -> Html {
    let input_type = if props.exclusive { "radio" } else { "checkbox" };
    html! {
        <fieldset class="choice-group">
            <legend>
                { props.legend.clone() }
                if props.required {
                    <span class="required-asterisk">{" *"}</span>
                }
            </legend>
            <div class="chips">
                { for props.options.iter().map(|option| html! {
                    <label class="chip">
                        <input
                            type={input_type}
                            name={props.name.clone()}
                            value={*option}
                            required={props.required && props.exclusive}
                        />
                        <span>{ *option }</span>
                    </label>
                }) }
            </div>
        </fieldset>
    }
}

#[function_component(Estimate)]
pub fn estimate() -> Html {
    let config = use_memo(|_| EstimateConfig::default(), ());
    let form_ref = use_node_ref();
    let toasts = use_reducer(ToastQueue::default);
    let draft_timer = use_mut_ref(|| None::<Timeout>);
    let reset_token = use_state(|| 0u32);

    // Restore a saved draft once the form is mounted
    {
        let form_ref = form_ref.clone();
        let toasts = toasts.clone();
        let config = config.clone();
        use_effect_with_deps(
            move |_| {
                match DomForm::from_ref(&form_ref) {
                    None => debug!("No estimate form on this page, skipping draft restore"),
                    Some(form) => match LocalStorageDrafts::new(config.draft_key.clone()).load() {
                        Ok(Some(draft)) if !draft.is_empty() => {
                            form.restore(&draft);
                            notify(&toasts, ToastKind::Info, "We restored the answers you left last time.");
                        }
                        Ok(_) => {}
                        Err(e) => warn!("Could not read estimate draft: {}", e),
                    },
                }
                || ()
            },
            (),
        );
    }

    let on_edit = {
        let form_ref = form_ref.clone();
        let draft_timer = draft_timer.clone();
        let config = config.clone();
        Callback::from(move |_: InputEvent| {
            let Some(form) = DomForm::from_ref(&form_ref) else {
                return;
            };
            let drafts = LocalStorageDrafts::new(config.draft_key.clone());
            // Replacing the pending timeout cancels it
            *draft_timer.borrow_mut() = Some(Timeout::new(config.draft_debounce_ms, move || {
                let draft = Draft::capture(&form.snapshot());
                match drafts.save(&draft) {
                    Ok(()) => debug!("Saved estimate draft with {} field(s)", draft.len()),
                    Err(e) => warn!("Could not save estimate draft: {}", e),
                }
            }));
        })
    };

    let on_phone_input = Callback::from(|e: InputEvent| {
        let input: HtmlInputElement = e.target_unchecked_into();
        let formatted = format_phone(&input.value());
        if formatted != input.value() {
            input.set_value(&formatted);
        }
    });

    let on_submit = {
        let form_ref = form_ref.clone();
        let toasts = toasts.clone();
        let draft_timer = draft_timer.clone();
        let reset_token = reset_token.clone();
        let config = config.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let Some(form) = DomForm::from_ref(&form_ref) else {
                debug!("Submit fired without a mounted estimate form");
                return;
            };

            let surface = DomSurface::new(&form, config::SUCCESS_PANEL_ID, config.success_reset_ms);
            let client = ClientContext::capture().unwrap_or_default();
            let pipeline = EstimatePipeline::from_config(&config, FetchTransport);
            let drafts = LocalStorageDrafts::new(config.draft_key.clone());
            let toasts = toasts.clone();
            let draft_timer = draft_timer.clone();
            let reset_token = reset_token.clone();

            spawn_local(async move {
                match pipeline.submit(&form, &surface, &client).await {
                    SubmitOutcome::Sent(_) => {
                        draft_timer.borrow_mut().take();
                        if let Err(e) = drafts.clear() {
                            warn!("Could not clear estimate draft: {}", e);
                        }
                        reset_token.set(*reset_token + 1);
                        notify(&toasts, ToastKind::Success, "Thanks! Your estimate request is on its way.");
                    }
                    SubmitOutcome::Invalid(err) => {
                        info!("Estimate form has {} invalid field(s)", err.fields.len());
                        notify(&toasts, ToastKind::Error, "Please check the highlighted fields.");
                    }
                    SubmitOutcome::Failed(_) => {}
                }
            });
        })
    };

    let on_dismiss = {
        let toasts = toasts.clone();
        Callback::from(move |id: u32| toasts.dispatch(ToastAction::Dismiss(id)))
    };

    html! {
        <div class="estimate-page">
            <style>
                {r#"
                    .estimate-page {
                        min-height: 100vh;
                        padding: 8rem 2rem 4rem;
                        color: #fff;
                        background: radial-gradient(circle at top, #14142b 0%, #0b0b14 60%);
                    }
                    .estimate-card {
                        max-width: 820px;
                        margin: 0 auto;
                        padding: 3rem;
                        border-radius: 20px;
                        background: rgba(255, 255, 255, 0.04);
                        border: 1px solid rgba(0, 212, 255, 0.15);
                        backdrop-filter: blur(12px);
                        box-shadow: 0 16px 48px rgba(0, 0, 0, 0.4);
                    }
                    .estimate-card h1 {
                        font-size: 2.4rem;
                        margin-bottom: 0.5rem;
                        background: linear-gradient(45deg, #fff, #00D4FF);
                        -webkit-background-clip: text;
                        -webkit-text-fill-color: transparent;
                    }
                    .estimate-card .lead {
                        color: rgba(255, 255, 255, 0.7);
                        margin-bottom: 2.5rem;
                    }
                    .form-row {
                        display: grid;
                        grid-template-columns: 1fr 1fr;
                        gap: 1.5rem;
                    }
                    .form-field {
                        display: flex;
                        flex-direction: column;
                        gap: 0.5rem;
                        margin-bottom: 1.5rem;
                    }
                    .form-field input,
                    .form-field select,
                    .form-field textarea {
                        padding: 0.85rem 1rem;
                        border-radius: 10px;
                        border: 1px solid rgba(255, 255, 255, 0.15);
                        background: rgba(0, 0, 0, 0.35);
                        color: #fff;
                        font-size: 1rem;
                        transition: border-color 0.2s ease, box-shadow 0.2s ease;
                    }
                    .form-field input:focus,
                    .form-field select:focus,
                    .form-field textarea:focus {
                        outline: none;
                        border-color: #00D4FF;
                        box-shadow: 0 0 0 3px rgba(0, 212, 255, 0.2);
                    }
                    .invalid,
                    .form-field .invalid {
                        border-color: #FF5C7A !important;
                        box-shadow: 0 0 0 3px rgba(255, 92, 122, 0.2);
                    }
                    .required-asterisk {
                        color: #FF5C7A;
                    }
                    .choice-group {
                        border: none;
                        padding: 0;
                        margin: 0 0 1.5rem;
                    }
                    .choice-group legend {
                        margin-bottom: 0.75rem;
                    }
                    .chips {
                        display: flex;
                        flex-wrap: wrap;
                        gap: 0.6rem;
                    }
                    .chip input {
                        position: absolute;
                        opacity: 0;
                        pointer-events: none;
                    }
                    .chip span {
                        display: inline-block;
                        padding: 0.55rem 1.1rem;
                        border-radius: 999px;
                        border: 1px solid rgba(255, 255, 255, 0.2);
                        cursor: pointer;
                        transition: all 0.2s ease;
                    }
                    .chip span:hover {
                        border-color: #00D4FF;
                        transform: translateY(-2px);
                    }
                    .chip input:checked + span {
                        background: linear-gradient(45deg, #00D4FF, #7B61FF);
                        border-color: transparent;
                        color: #0b0b14;
                        font-weight: 600;
                    }
                    .chip input.invalid + span {
                        border-color: #FF5C7A;
                    }
                    .consent {
                        display: flex;
                        align-items: center;
                        gap: 0.6rem;
                        margin-bottom: 0.8rem;
                        color: rgba(255, 255, 255, 0.8);
                    }
                    .consent a {
                        color: #00D4FF;
                    }
                    .drop-area {
                        border: 2px dashed rgba(255, 255, 255, 0.2);
                        border-radius: 14px;
                        padding: 1.5rem;
                        text-align: center;
                        margin-bottom: 1.5rem;
                        transition: all 0.2s ease;
                    }
                    .drop-area.highlight {
                        border-color: #00D4FF;
                        background: rgba(0, 212, 255, 0.1);
                    }
                    .file-pick {
                        color: #00D4FF;
                        cursor: pointer;
                        text-decoration: underline;
                    }
                    .file-pick input {
                        display: none;
                    }
                    .file-list {
                        list-style: none;
                        padding: 0;
                        margin-top: 1rem;
                        text-align: left;
                    }
                    .file-list li {
                        display: flex;
                        gap: 0.75rem;
                        align-items: center;
                        padding: 0.4rem 0;
                    }
                    .file-size {
                        color: rgba(255, 255, 255, 0.5);
                    }
                    .remove-file {
                        margin-left: auto;
                        background: none;
                        border: none;
                        color: #FF5C7A;
                        cursor: pointer;
                    }
                    .submit-button {
                        width: 100%;
                        padding: 1.1rem;
                        margin-top: 1rem;
                        border: none;
                        border-radius: 12px;
                        font-size: 1.1rem;
                        font-weight: 700;
                        color: #0b0b14;
                        background: linear-gradient(45deg, #00D4FF, #7B61FF);
                        cursor: pointer;
                        transition: transform 0.2s ease, box-shadow 0.2s ease;
                    }
                    .submit-button:hover:not(:disabled) {
                        transform: translateY(-2px);
                        box-shadow: 0 10px 30px rgba(0, 212, 255, 0.35);
                    }
                    .submit-button:disabled {
                        opacity: 0.6;
                        cursor: wait;
                    }
                    .error-message {
                        display: flex;
                        align-items: center;
                        gap: 0.75rem;
                        padding: 1rem 1.2rem;
                        margin-bottom: 1.5rem;
                        border-radius: 10px;
                        background: rgba(255, 92, 122, 0.12);
                        border: 1px solid rgba(255, 92, 122, 0.4);
                        color: #FFB3C1;
                    }
                    .error-message button {
                        margin-left: auto;
                        background: none;
                        border: none;
                        color: inherit;
                        cursor: pointer;
                    }
                    .success-message {
                        text-align: center;
                        padding: 3rem 1rem;
                    }
                    .success-message h2 {
                        font-size: 2rem;
                        margin-bottom: 1rem;
                    }
                    @media (max-width: 768px) {
                        .estimate-card {
                            padding: 2rem 1.25rem;
                        }
                        .form-row {
                            grid-template-columns: 1fr;
                            gap: 0;
                        }
                    }
                "#}
            </style>
            <div class="estimate-card">
                <h1>{"Get a free estimate"}</h1>
                <p class="lead">{"Tell us about your project. We reply within one business day."}</p>

                <form id={config::ESTIMATE_FORM_ID} ref={form_ref.clone()} novalidate={true} onsubmit={on_submit} oninput={on_edit}>
                    <div class="form-row">
                        <div class="form-field">
                            <FieldLabel for_id="name" text="Name" required=true />
                            <input id="name" name="name" type="text" autocomplete="name" required={true} />
                        </div>
                        <div class="form-field">
                            <FieldLabel for_id="email" text="Email" required=true />
                            <input id="email" name="email" type="email" autocomplete="email" required={true} />
                        </div>
                    </div>
                    <div class="form-row">
                        <div class="form-field">
                            <FieldLabel for_id="phone" text="Phone" required=true />
                            <input id="phone" name="phone" type="tel" inputmode="numeric" placeholder="010-0000-0000"
                                required={true} oninput={on_phone_input} />
                        </div>
                        <div class="form-field">
                            <FieldLabel for_id="company" text="Company" />
                            <input id="company" name="company" type="text" autocomplete="organization" />
                        </div>
                    </div>
                    <div class="form-field">
                        <FieldLabel for_id="industry" text="Industry" />
                        <select id="industry" name="industry">
                            <option value="">{"Select your industry"}</option>
                            { for INDUSTRIES.iter().map(|i| html! { <option value={*i}>{ *i }</option> }) }
                        </select>
                    </div>

                    <ChoiceGroup name="website-type" legend="What are we building?" options={WEBSITE_TYPES} />
                    <ChoiceGroup name="design-style" legend="Preferred design style" options={DESIGN_STYLES} />
                    <ChoiceGroup name="features" legend="Features you need" options={FEATURES} />
                    <ChoiceGroup name="page-count" legend="Number of pages" options={PAGE_COUNTS} exclusive=true />
                    <ChoiceGroup name="timeline" legend="Timeline" options={TIMELINES} exclusive=true />

                    <div class="form-row">
                        <div class="form-field">
                            <FieldLabel for_id="budget" text="Budget" />
                            <select id="budget" name="budget">
                                <option value="">{"Select a range"}</option>
                                { for BUDGETS.iter().map(|b| html! { <option value={*b}>{ *b }</option> }) }
                            </select>
                        </div>
                        <div class="form-field">
                            <FieldLabel for_id="references" text="Reference sites" />
                            <input id="references" name="references" type="text" placeholder="https://..." />
                        </div>
                    </div>
                    <div class="form-field">
                        <FieldLabel for_id="project-desc" text="Project description" required=true />
                        <textarea id="project-desc" name="project-desc" rows="6" required={true}
                            placeholder="Goals, audience, anything we should know"></textarea>
                    </div>

                    <FileDrop name="attachments" reset_token={*reset_token} />

                    <label class="consent">
                        <input type="checkbox" name="privacyAgree" required={true} />
                        <span>
                            {"I agree to the "}
                            <Link<Route> to={Route::Privacy}>{"privacy policy"}</Link<Route>>
                            <span class="required-asterisk">{" *"}</span>
                        </span>
                    </label>
                    <label class="consent">
                        <input type="checkbox" name="marketingConsent" />
                        <span>{"Send me occasional news and design tips"}</span>
                    </label>

                    <button type="submit" class="submit-button">{"Request estimate"}</button>
                </form>

                <div id={config::SUCCESS_PANEL_ID} class="success-message" style="display: none;">
                    <h2>{"🎉 Request received"}</h2>
                    <p>{"Thanks for reaching out. We'll get back to you within 24 hours."}</p>
                </div>
            </div>

            <ToastStack toasts={toasts.toasts().to_vec()} on_dismiss={on_dismiss} />
        </div>
    }
}
