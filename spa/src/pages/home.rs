use yew::prelude::*;

struct Feature {
    icon: &'static str,
    alt: &'static str,
    title: &'static str,
    text: &'static str,
}

const FEATURES: [Feature; 3] = [
    Feature {
        icon: "/img/icon-chat.png",
        alt: "Chat Icon",
        title: "You are our #1 priority",
        text: "Need to talk to a representative? You can get in touch through our \
               24/7 chat or through a phone call in less than 5 minutes.",
    },
    Feature {
        icon: "/img/icon-money.png",
        alt: "Money Icon",
        title: "More savings means higher rates",
        text: "The more you save with us, the higher your interest rate will be!",
    },
    Feature {
        icon: "/img/icon-security.png",
        alt: "Security Icon",
        title: "Security you can trust",
        text: "We use top of the line encryption to make sure your data and money \
               is always safe.",
    },
];

#[function_component(Home)]
pub fn home() -> Html {
    html! {
        <main>
            <div class="hero">
                <section class="hero-content">
                    <h2 class="sr-only">{ "Promoted Content" }</h2>
                    <p class="subtitle">{ "No fees." }</p>
                    <p class="subtitle">{ "No minimum deposit." }</p>
                    <p class="subtitle">{ "High interest rates." }</p>
                    <p class="text">{ "Open a savings account with Argent Bank today!" }</p>
                </section>
            </div>
            <section class="features">
                <h2 class="sr-only">{ "Features" }</h2>
                { for FEATURES.iter().map(|feature| html! {
                    <div class="feature-item">
                        <img src={feature.icon} alt={feature.alt} class="feature-icon" />
                        <h3 class="feature-item-title">{ feature.title }</h3>
                        <p>{ feature.text }</p>
                    </div>
                }) }
            </section>
        </main>
    }
}
