//! Signup Example - A form wired end to end
//!
//! This example demonstrates the full data flow without a terminal host:
//! - Binding paths with transforms, validators, and timing policies
//! - Driving adapters with raw events, including an IME composition
//! - Batched writes and the resulting single notification per path
//! - Snapshot of the finished tree
//!
//! Run with: cargo run --example signup

use spark_form::pipeline::{email, min_length, required, trim};
use spark_form::{
    value_signal, BindingOptions, ControlKind, EventData, InputAdapter, Platform, RawEvent, Store,
    ValidationTiming, Value,
};
use spark_signals::effect;

fn main() {
    println!("=== spark-form Signup Example ===\n");

    let store = Store::new();

    // Bind the form fields.
    let name = store.bind::<String>(
        "signup.name",
        BindingOptions::new()
            .transform_value(trim())
            .validate_value(required()),
    );
    let mail = store.bind::<String>(
        "signup.email",
        BindingOptions::new()
            .transform_value(trim())
            .validate_value(required())
            .validate_value(email())
            .timing(ValidationTiming::OnSubmit),
    );
    let password = store.bind::<String>(
        "signup.password",
        BindingOptions::new().validate_value(min_length(8)),
    );
    let agree = store.bind::<bool>("signup.agree", BindingOptions::new());

    // A signal-driven "renderer" watching the name field.
    let (name_sig, _cleanup) = value_signal(&name);
    let _render = effect(move || {
        println!("[render] name is now {:?}", name_sig.get().display_string());
    });

    // Attach adapters the way a rendering layer would.
    let name_adapter = InputAdapter::new(
        store.binding("signup.name"),
        ControlKind::Text,
        Platform::Desktop,
    );
    let mail_adapter = InputAdapter::new(
        store.binding("signup.email"),
        ControlKind::Text,
        Platform::Desktop,
    );
    let agree_adapter = InputAdapter::new(
        store.binding("signup.agree"),
        ControlKind::Checkbox,
        Platform::Desktop,
    );

    // Type a name, with an IME composition in the middle. The per-key
    // events during composition are suppressed on desktop; the final
    // composed text always commits.
    name_adapter.handle(RawEvent::Input {
        data: EventData::text("A", 1),
    });
    name_adapter.handle(RawEvent::CompositionStart {
        text: "A".to_string(),
    });
    name_adapter.handle(RawEvent::Input {
        data: EventData::text_only("Aか"),
    });
    name_adapter.handle(RawEvent::CompositionEnd {
        text: "A香".to_string(),
    });
    println!("name committed: {:?}", name.get());

    // An invalid email, hidden until submit is attempted.
    mail_adapter.handle(RawEvent::Input {
        data: EventData::text("not-an-email", 12),
    });
    println!(
        "email error before submit: {:?}",
        mail_adapter.visible_error()
    );
    mail_adapter.mark_submit_attempted();
    println!(
        "email error after submit:  {:?}",
        mail_adapter.visible_error()
    );
    println!("email binding error:       {:?}", mail.error());

    // Checkbox through its attribute bundle.
    let checkbox = agree_adapter.checkbox_attrs();
    (checkbox.on_change)(true);
    println!("agreed: {}", agree.get());

    // Batch a programmatic prefill: one notification per path.
    store.batch(|| {
        password.set("hunter2hunter2".to_string());
        store.write("signup.newsletter", Value::Bool(false));
    });
    println!("password valid: {}", password.is_valid());

    println!("\nfinal tree: {}", store.snapshot());
}
