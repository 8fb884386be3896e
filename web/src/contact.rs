use std::collections::HashSet;

use pexeso_widgets::Feedback;
use pexeso_widgets::contact::{ContactDraft, ContactForm, Field, mask_phone};
use web_sys::{HtmlInputElement, HtmlTextAreaElement};
use yew::prelude::*;

#[derive(Clone, Debug, PartialEq)]
pub(crate) enum ContactMsg {
    Edit(Field, String),
    Submit,
}

/// Normalizes typed input before it is stored in the draft.
fn normalize(field: Field, value: String) -> String {
    match field {
        Field::Phone => mask_phone(&value),
        _ => value,
    }
}

#[derive(Debug, Default)]
pub(crate) struct ContactView {
    form: ContactForm,
    draft: ContactDraft,
    touched: HashSet<Field>,
    result: Option<Feedback>,
}

impl ContactView {
    fn field_class(&self, field: Field) -> Classes {
        if !self.touched.contains(&field) {
            return classes!();
        }
        if self.form.validate(field, self.draft.get(field)) {
            classes!("valid")
        } else {
            classes!("invalid")
        }
    }

    fn field_view(&self, ctx: &Context<Self>, field: Field) -> Html {
        let class = self.field_class(field);
        let value = self.draft.get(field).to_string();
        let hint = self.touched.contains(&field) && !self.form.validate(field, &value);

        let input = match field {
            Field::Message => html! {
                <textarea
                    {value}
                    oninput={ctx.link().callback(move |e: InputEvent| {
                        ContactMsg::Edit(field, e.target_unchecked_into::<HtmlTextAreaElement>().value())
                    })}
                />
            },
            _ => html! {
                <input
                    type={if field == Field::Email { "email" } else { "text" }}
                    {value}
                    oninput={ctx.link().callback(move |e: InputEvent| {
                        ContactMsg::Edit(field, e.target_unchecked_into::<HtmlInputElement>().value())
                    })}
                />
            },
        };

        html! {
            <label {class}>
                {field.label()}
                {input}
                if hint {
                    <small>{field.hint()}</small>
                }
            </label>
        }
    }
}

impl Component for ContactView {
    type Message = ContactMsg;
    type Properties = ();

    fn create(_ctx: &Context<Self>) -> Self {
        Self::default()
    }

    fn update(&mut self, _ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            ContactMsg::Edit(field, value) => {
                self.draft.set(field, normalize(field, value));
                self.touched.insert(field);
                self.result = None;
            }
            ContactMsg::Submit => {
                self.touched.extend(Field::ALL);
                let result = self
                    .form
                    .submit(&self.draft)
                    .map(|()| "Thanks! Your message has been sent.");
                if result.is_ok() {
                    self.draft = ContactDraft::default();
                    self.touched.clear();
                }
                self.result = Some(result.into());
            }
        }
        true
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let onsubmit = ctx.link().callback(|e: SubmitEvent| {
            e.prevent_default();
            ContactMsg::Submit
        });

        let result = self.result.as_ref().map(|feedback| {
            let class = if feedback.success { "success" } else { "error" };
            html! { <p {class}>{feedback.message.clone()}</p> }
        });

        html! {
            <form class="contact" {onsubmit} novalidate=true>
                { for Field::ALL.into_iter().map(|field| self.field_view(ctx, field)) }
                <button type="submit">{"Send"}</button>
                {result}
            </form>
        }
    }
}
