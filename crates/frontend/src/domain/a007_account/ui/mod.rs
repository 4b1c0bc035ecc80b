//! Accounts page: account creation plus deposit/withdraw/transfer entry.

use contracts::domain::a007_account::aggregate::{AccountDraft, TransactionDraft, TransactionKind};
use contracts::domain::common::{to_document, AuditStamp, BranchScope};
use contracts::shared::query::{QueryDescriptor, Select, Sort};
use contracts::shared::validation::ValidationReport;
use leptos::prelude::*;

use crate::layout::global_context::AppGlobalContext;
use crate::shared::components::FieldError;
use crate::shared::format::format_money;
use crate::shared::gateway::{self, ReadMethod, WriteMethod};

#[derive(Clone, Debug, PartialEq)]
struct AccountItem {
    id: String,
    name: String,
    balance: f64,
}

async fn fetch_accounts(branch_id: &str) -> Result<Vec<AccountItem>, String> {
    let descriptor = QueryDescriptor::scoped("account", branch_id, None)
        .with_select(Select::include(&["_id", "name", "balance"]))
        .with_sort(Sort::ascending("name"));
    let envelope = gateway::read_or_delete("list", ReadMethod::Get, &descriptor).await?;
    if !envelope.success {
        return Err(envelope.error_text());
    }
    let docs = envelope.message.as_array().cloned().unwrap_or_default();
    Ok(docs
        .into_iter()
        .filter_map(|doc| {
            Some(AccountItem {
                id: doc["_id"].as_str()?.to_string(),
                name: doc["name"].as_str().unwrap_or_default().to_string(),
                balance: doc["balance"].as_f64().unwrap_or(0.0),
            })
        })
        .collect())
}

#[component]
pub fn AccountPage() -> impl IntoView {
    let ctx = leptos::context::use_context::<AppGlobalContext>()
        .expect("AppGlobalContext context not found");

    let accounts = RwSignal::new(Vec::<AccountItem>::new());

    let reload_accounts = move || {
        wasm_bindgen_futures::spawn_local(async move {
            let branch_id = ctx.branch_id.get_untracked();
            match fetch_accounts(&branch_id).await {
                Ok(rows) => accounts.set(rows),
                Err(e) => log::warn!("account list failed: {}", e),
            }
        });
    };
    reload_accounts();

    view! {
        <div class="account-page">
            <AccountForm on_saved=reload_accounts />
            <TransactionForm accounts=accounts on_saved=reload_accounts />
        </div>
    }
}

#[component]
fn AccountForm<F>(on_saved: F) -> impl IntoView
where
    F: Fn() + 'static + Clone + Copy + Send,
{
    let ctx = leptos::context::use_context::<AppGlobalContext>()
        .expect("AppGlobalContext context not found");

    let form = RwSignal::new(AccountDraft::default());
    let report = RwSignal::new(ValidationReport::new());
    let loading = RwSignal::new(false);

    let submit = move |_| {
        if loading.get_untracked() {
            return;
        }
        let draft = form.get_untracked();
        match draft.validate() {
            Ok(()) => report.set(ValidationReport::new()),
            Err(r) => {
                report.set(r);
                return;
            }
        }
        loading.set(true);
        wasm_bindgen_futures::spawn_local(async move {
            let branch_id = ctx.branch_id.get_untracked();
            let user_id = ctx.user_id.get_untracked();
            let result = async {
                let doc = to_document(
                    &draft,
                    &BranchScope::new(&branch_id),
                    &AuditStamp::on_create(&user_id),
                )?;
                let body = gateway::create_body("account", doc);
                let envelope =
                    gateway::create_or_update("create", WriteMethod::Post, &body).await?;
                if envelope.success {
                    Ok(())
                } else {
                    Err(envelope.error_text())
                }
            }
            .await;
            loading.set(false);
            match result {
                Ok(()) => {
                    ctx.notify_success("account created");
                    form.set(AccountDraft::default());
                    on_saved();
                }
                Err(e) => ctx.notify_error(e),
            }
        });
    };

    view! {
        <div class="details-container account-form">
            <div class="details-header">
                <h3>{"New account"}</h3>
            </div>

            <div class="details-form">
                <div class="form-group">
                    <label for="account_name">{"Name"}</label>
                    <input
                        type="text"
                        id="account_name"
                        prop:value=move || form.get().name
                        on:input=move |ev| {
                            form.update(|f| f.name = event_target_value(&ev));
                        }
                    />
                    <FieldError report=report field="name" />
                </div>

                <div class="form-group">
                    <label for="account_number">{"Number"}</label>
                    <input
                        type="text"
                        id="account_number"
                        prop:value=move || form.get().number
                        on:input=move |ev| {
                            form.update(|f| f.number = event_target_value(&ev));
                        }
                    />
                </div>

                <div class="form-group">
                    <label for="opening_balance">{"Opening balance"}</label>
                    <input
                        type="number"
                        id="opening_balance"
                        prop:value=move || form.get().balance
                        on:input=move |ev| {
                            let value = event_target_value(&ev).parse().unwrap_or(0.0);
                            form.update(|f| f.balance = value);
                        }
                    />
                    <FieldError report=report field="balance" />
                </div>
            </div>

            <div class="details-actions">
                <button class="btn btn-primary" on:click=submit disabled=move || loading.get()>
                    {"Create account"}
                </button>
            </div>
        </div>
    }
}

#[component]
fn TransactionForm<F>(accounts: RwSignal<Vec<AccountItem>>, on_saved: F) -> impl IntoView
where
    F: Fn() + 'static + Clone + Copy + Send,
{
    let ctx = leptos::context::use_context::<AppGlobalContext>()
        .expect("AppGlobalContext context not found");

    let form = RwSignal::new(TransactionDraft::default());
    let report = RwSignal::new(ValidationReport::new());
    let loading = RwSignal::new(false);

    let source_balance = move || {
        let id = form.get().account_id;
        accounts
            .get()
            .iter()
            .find(|a| a.id == id)
            .map(|a| a.balance)
            .unwrap_or(0.0)
    };

    let submit = move |_| {
        if loading.get_untracked() {
            return;
        }
        let mut draft = form.get_untracked();
        draft.recompute_fee(ctx.transfer_fee_rate.get_untracked());
        let balance = {
            let id = &draft.account_id;
            accounts
                .get_untracked()
                .iter()
                .find(|a| &a.id == id)
                .map(|a| a.balance)
                .unwrap_or(0.0)
        };
        match draft.validate(balance) {
            Ok(()) => report.set(ValidationReport::new()),
            Err(r) => {
                report.set(r);
                return;
            }
        }
        loading.set(true);
        wasm_bindgen_futures::spawn_local(async move {
            let branch_id = ctx.branch_id.get_untracked();
            let user_id = ctx.user_id.get_untracked();
            let result = async {
                let doc = to_document(
                    &draft,
                    &BranchScope::new(&branch_id),
                    &AuditStamp::on_create(&user_id),
                )?;
                let body = gateway::create_body("transaction", doc);
                let envelope =
                    gateway::create_or_update("create", WriteMethod::Post, &body).await?;
                if envelope.success {
                    Ok(())
                } else {
                    Err(envelope.error_text())
                }
            }
            .await;
            loading.set(false);
            match result {
                Ok(()) => {
                    ctx.notify_success("transaction recorded");
                    form.set(TransactionDraft::default());
                    on_saved();
                }
                Err(e) => ctx.notify_error(e),
            }
        });
    };

    view! {
        <div class="details-container transaction-form">
            <div class="details-header">
                <h3>{"New transaction"}</h3>
            </div>

            <div class="details-form">
                <div class="form-group">
                    <label for="account">{"Account"}</label>
                    <select
                        id="account"
                        on:change=move |ev| {
                            form.update(|f| f.account_id = event_target_value(&ev));
                        }
                    >
                        <option value="">{"Select an account"}</option>
                        {move || {
                            accounts
                                .get()
                                .into_iter()
                                .map(|a| {
                                    let label = format!("{} ({})", a.name, format_money(a.balance));
                                    view! { <option value=a.id.clone()>{label}</option> }
                                })
                                .collect_view()
                        }}
                    </select>
                    <FieldError report=report field="accountId" />
                    <div class="field-hint">
                        {move || format!("balance: {}", format_money(source_balance()))}
                    </div>
                </div>

                <div class="form-group">
                    <label for="kind">{"Type"}</label>
                    <select
                        id="kind"
                        on:change=move |ev| {
                            let kind = match event_target_value(&ev).as_str() {
                                "withdraw" => TransactionKind::Withdraw,
                                "transfer" => TransactionKind::Transfer,
                                _ => TransactionKind::Deposit,
                            };
                            let rate = ctx.transfer_fee_rate.get_untracked();
                            form.update(|f| {
                                f.kind = kind;
                                f.recompute_fee(rate);
                            });
                        }
                    >
                        <option value="deposit">{"Deposit"}</option>
                        <option value="withdraw">{"Withdraw"}</option>
                        <option value="transfer">{"Transfer"}</option>
                    </select>
                </div>

                <div class="form-group">
                    <label for="amount">{"Amount"}</label>
                    <input
                        type="number"
                        id="amount"
                        prop:value=move || form.get().amount
                        on:input=move |ev| {
                            let value = event_target_value(&ev).parse().unwrap_or(0.0);
                            let rate = ctx.transfer_fee_rate.get_untracked();
                            form.update(|f| {
                                f.amount = value;
                                f.recompute_fee(rate);
                            });
                        }
                    />
                    <FieldError report=report field="amount" />
                </div>

                <div class="form-group">
                    <label>{"Fee"}</label>
                    <span class="readonly-value">{move || format_money(form.get().fee)}</span>
                </div>

                {move || {
                    (form.get().kind == TransactionKind::Transfer)
                        .then(|| {
                            view! {
                                <div class="form-group">
                                    <label for="destination">{"Destination account"}</label>
                                    <select
                                        id="destination"
                                        on:change=move |ev| {
                                            form.update(|f| {
                                                f.destination_account_id = event_target_value(&ev);
                                            });
                                        }
                                    >
                                        <option value="">{"Select an account"}</option>
                                        {accounts
                                            .get()
                                            .into_iter()
                                            .map(|a| {
                                                view! {
                                                    <option value=a.id.clone()>{a.name.clone()}</option>
                                                }
                                            })
                                            .collect_view()}
                                    </select>
                                    <FieldError report=report field="destinationAccountId" />
                                </div>
                            }
                        })
                }}
            </div>

            <div class="details-actions">
                <button class="btn btn-primary" on:click=submit disabled=move || loading.get()>
                    {"Record transaction"}
                </button>
            </div>
        </div>
    }
}
