use pexeso_widgets::Feedback;
use pexeso_widgets::bank::{self, Amount, BankAccount, BankError, Currency};
use web_sys::{HtmlInputElement, HtmlSelectElement};
use yew::prelude::*;

#[derive(Clone, Debug, PartialEq)]
pub(crate) enum BankMsg {
    SetPin(String),
    Login,
    SetAmount(String),
    SetCard(String),
    SetCurrency(Currency),
    Deposit,
    Withdraw,
    Transfer,
    Send,
}

fn feedback_line(feedback: &Feedback) -> Html {
    let (class, mark) = if feedback.success {
        ("success", "✔")
    } else {
        ("error", "✘")
    };
    html! {
        <span {class}>{format!("{} {}", mark, feedback.message)}</span>
    }
}

fn input_value(e: InputEvent) -> String {
    e.target_unchecked_into::<HtmlInputElement>().value()
}

#[derive(Debug, Default)]
pub(crate) struct BankView {
    account: BankAccount,
    logged_in: bool,
    pin: String,
    amount: String,
    card: String,
    currency: Currency,
    feedback: Option<Feedback>,
}

impl BankView {
    fn apply<F>(&mut self, action: F)
    where
        F: FnOnce(&mut BankAccount, Amount, Currency) -> bank::Result<String>,
    {
        let currency = self.currency;
        let result = Amount::parse(&self.amount)
            .and_then(|amount| action(&mut self.account, amount, currency));
        if let Err(err) = &result {
            log::debug!("bank action refused: {}", err);
        }
        self.feedback = Some(result.into());
        self.amount.clear();
    }

    /// A missing card is reported before the amount is looked at.
    fn send(&mut self) {
        let card = self.card.trim().to_owned();
        if card.is_empty() {
            self.feedback = Some(Feedback::error(BankError::MissingCard.to_string()));
            self.amount.clear();
            return;
        }
        self.apply(|account, amount, currency| account.send_money(amount, currency, &card));
    }
}

impl Component for BankView {
    type Message = BankMsg;
    type Properties = ();

    fn create(_ctx: &Context<Self>) -> Self {
        Self::default()
    }

    fn update(&mut self, _ctx: &Context<Self>, msg: Self::Message) -> bool {
        use BankMsg::*;

        match msg {
            SetPin(pin) => self.pin = pin,
            Login => {
                let result = self.account.login(&self.pin);
                self.logged_in = result.is_ok();
                self.feedback = Some(result.into());
                self.pin.clear();
            }
            SetAmount(amount) => self.amount = amount,
            SetCard(card) => self.card = card,
            SetCurrency(currency) => self.currency = currency,
            Deposit => self.apply(BankAccount::deposit),
            Withdraw => self.apply(BankAccount::withdraw),
            Transfer => self.apply(BankAccount::transfer),
            Send => self.send(),
        }
        true
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let link = ctx.link();
        let feedback = self.feedback.as_ref().map(feedback_line);

        if !self.logged_in {
            return html! {
                <div class="bank login">
                    <input
                        type="password"
                        placeholder="PIN"
                        value={self.pin.clone()}
                        oninput={link.callback(|e: InputEvent| BankMsg::SetPin(input_value(e)))}
                    />
                    <button onclick={link.callback(|_: MouseEvent| BankMsg::Login)}>{"Log in"}</button>
                    <p>{feedback}</p>
                </div>
            };
        }

        let balances = self.account.balances();
        let cb_currency = link.batch_callback(|e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            select.value().parse::<Currency>().ok().map(BankMsg::SetCurrency)
        });

        html! {
            <div class="bank">
                <dl>
                    <dt>{Currency::Usd.code()}</dt>
                    <dd>{format!("{}{}", Currency::Usd.sign(), balances.usd)}</dd>
                    <dt>{Currency::Eur.code()}</dt>
                    <dd>{format!("{}{}", Currency::Eur.sign(), balances.eur)}</dd>
                </dl>
                <p class="message">{feedback}</p>
                <input
                    type="text"
                    inputmode="decimal"
                    placeholder="Amount"
                    value={self.amount.clone()}
                    oninput={link.callback(|e: InputEvent| BankMsg::SetAmount(input_value(e)))}
                />
                <select onchange={cb_currency}>
                    {
                        for Currency::ALL.into_iter().map(|currency| html! {
                            <option value={currency.code()} selected={currency == self.currency}>
                                {currency.code()}
                            </option>
                        })
                    }
                </select>
                <input
                    type="text"
                    placeholder="Recipient card"
                    value={self.card.clone()}
                    oninput={link.callback(|e: InputEvent| BankMsg::SetCard(input_value(e)))}
                />
                <nav>
                    <button onclick={link.callback(|_: MouseEvent| BankMsg::Deposit)}>{"Deposit"}</button>
                    <button onclick={link.callback(|_: MouseEvent| BankMsg::Withdraw)}>{"Withdraw"}</button>
                    <button onclick={link.callback(|_: MouseEvent| BankMsg::Transfer)}>{"Convert"}</button>
                    <button onclick={link.callback(|_: MouseEvent| BankMsg::Send)}>{"Send"}</button>
                </nav>
            </div>
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_amount_is_reported_and_cleared() {
        let mut view = BankView::default();
        view.amount = "abc".into();

        view.apply(BankAccount::deposit);

        assert_eq!(view.feedback, Some(Feedback::error("Enter a positive amount.")));
        assert!(view.amount.is_empty());
    }

    #[test]
    fn deposit_uses_selected_currency() {
        let mut view = BankView {
            currency: Currency::Eur,
            amount: "20".into(),
            ..Default::default()
        };

        view.apply(BankAccount::deposit);

        assert_eq!(view.feedback, Some(Feedback::ok("Deposited 20.00 EUR")));
        assert_eq!(view.account.balances().eur, Amount::from_cents(2000));
    }

    #[test]
    fn send_without_card_reports_card_first() {
        let mut view = BankView {
            amount: "abc".into(),
            card: "  ".into(),
            ..Default::default()
        };

        view.send();

        assert_eq!(
            view.feedback,
            Some(Feedback::error("Please enter a Recipient Card Number."))
        );
        assert!(view.amount.is_empty());
    }
}
