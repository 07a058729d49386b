use yew::prelude::*;
use yew_router::prelude::*;

use crate::Route;

const LEGAL_CSS: &str = r#"
.legal-content {
    min-height: 100vh;
    background: #0b0b14;
    padding: 8rem 2rem 4rem;
    color: #fff;
    display: flex;
    flex-direction: column;
    align-items: center;
}

.legal-content h1 {
    font-size: 2rem;
    background: linear-gradient(45deg, #fff, #00D4FF);
    -webkit-background-clip: text;
    -webkit-text-fill-color: transparent;
    margin-bottom: 2.5rem;
}

.legal-content section {
    background: rgba(255, 255, 255, 0.03);
    border: 1px solid rgba(0, 212, 255, 0.1);
    border-radius: 12px;
    width: 100%;
    max-width: 720px;
    padding: 2rem;
    margin: 1rem auto;
}

.legal-content h2 {
    color: #00D4FF;
    font-size: 1.3rem;
    margin-bottom: 1rem;
}

.legal-content p, .legal-content li {
    color: #aaa;
    line-height: 1.6;
    margin-bottom: 0.75rem;
}

.legal-content ul {
    list-style-type: none;
    padding-left: 1.5rem;
}

.legal-content li {
    position: relative;
}

.legal-content li:before {
    content: "•";
    color: #7B61FF;
    position: absolute;
    left: -1.5rem;
}

.legal-links {
    margin-top: 2rem;
    text-align: center;
}

.legal-links a {
    color: #00D4FF;
    text-decoration: none;
    transition: color 0.3s ease;
}

.legal-links a:hover {
    color: #7B61FF;
}
"#;

#[function_component(PrivacyPolicy)]
pub fn privacy_policy() -> Html {
    html! {
        <div class="legal-content privacy-policy">
            <style>{ LEGAL_CSS }</style>
            <h1>{"Privacy Policy"}</h1>

            <section>
                <h2>{"1. What we collect"}</h2>
                <p>{"When you request an estimate we collect:"}</p>
                <ul>
                    <li>{"Name, email address and phone number (to reply to you)"}</li>
                    <li>{"Company, industry and project details you choose to share"}</li>
                    <li>{"The page address, browser, language, screen size and time zone at the moment you submit"}</li>
                </ul>
            </section>

            <section>
                <h2>{"2. Why we collect it"}</h2>
                <ul>
                    <li>{"Preparing and sending the estimate you asked for"}</li>
                    <li>{"Following up on your project if you become a client"}</li>
                    <li>{"Sending occasional news, only if you ticked the marketing box"}</li>
                </ul>
            </section>

            <section>
                <h2>{"3. Where it is stored"}</h2>
                <p>{"Requests are stored in a private spreadsheet that only our team can open. Unfinished answers are kept in your own browser's local storage until you send the form or clear your browser data."}</p>
            </section>

            <section>
                <h2>{"4. How long we keep it"}</h2>
                <ul>
                    <li>{"Estimate requests that do not lead to a project: 1 year"}</li>
                    <li>{"Client records: as long as the law requires"}</li>
                </ul>
            </section>

            <section>
                <h2>{"5. Your rights"}</h2>
                <p>{"You can ask us at any time to see, correct or delete what we hold about you, or to stop marketing messages."}</p>
            </section>

            <section>
                <h2>{"6. Contact"}</h2>
                <p>{"Email: hello@ashop.studio"}</p>
            </section>

            <div class="legal-links">
                <Link<Route> to={Route::Estimate}>{"Back to the estimate form"}</Link<Route>>
                {" | "}
                <Link<Route> to={Route::Home}>{"Home"}</Link<Route>>
            </div>
        </div>
    }
}

#[function_component(NotFound)]
pub fn not_found() -> Html {
    html! {
        <div class="legal-content">
            <style>{ LEGAL_CSS }</style>
            <h1>{"Page not found"}</h1>
            <p>{"The page you were looking for has moved or never existed."}</p>
            <div class="legal-links">
                <Link<Route> to={Route::Home}>{"Take me home"}</Link<Route>>
            </div>
        </div>
    }
}
