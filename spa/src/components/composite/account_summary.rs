use yew::prelude::*;

#[derive(Debug, Clone, PartialEq)]
pub struct Account {
    pub title: &'static str,
    pub amount: &'static str,
    pub description: &'static str,
}

/// Demo accounts shown on the profile page.
pub const ACCOUNTS: [Account; 3] = [
    Account {
        title: "Argent Bank Checking (x8349)",
        amount: "$2,082.79",
        description: "Available Balance",
    },
    Account {
        title: "Argent Bank Savings (x6712)",
        amount: "$10,928.42",
        description: "Available Balance",
    },
    Account {
        title: "Argent Bank Credit Card (x8349)",
        amount: "$184.30",
        description: "Current Balance",
    },
];

#[derive(PartialEq, Properties)]
pub struct Props {
    pub account: Account,
}

#[function_component(AccountSummary)]
pub fn account_summary(props: &Props) -> Html {
    let account = &props.account;
    html! {
        <section class="account">
            <div class="account-content-wrapper">
                <h3 class="account-title">{ account.title }</h3>
                <p class="account-amount">{ account.amount }</p>
                <p class="account-amount-description">{ account.description }</p>
            </div>
            <div class="account-content-wrapper cta">
                <button class="transaction-button">{ "View transactions" }</button>
            </div>
        </section>
    }
}
