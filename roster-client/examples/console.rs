// roster-client/examples/console.rs
// 控制台示例 - 无界面驱动一次完整的增删改查流程

//! Headless walk through the console core.
//!
//! Run: cargo run --example console -- [collection_url]
//!      cargo run --example console -- --offline

use std::sync::Arc;

use roster_client::{
    ClientConfig, ConsoleIntent, ConsoleView, EmployeeConsole, FormField, InMemoryCollectionClient,
};
use serde_json::json;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let arg = std::env::args().nth(1);
    let console = match arg.as_deref() {
        Some("--offline") => {
            let remote = InMemoryCollectionClient::from_json(json!([
                { "id": 1, "name": "Ana Ruiz", "email": "ana@example.com", "position": "Engineer" },
                { "id": 2, "name": "Bo Chen", "email": "bo@example.com", "salary": 58000 }
            ]))?;
            EmployeeConsole::new(Arc::new(remote))
        }
        Some(url) => EmployeeConsole::from_config(&ClientConfig::new(url))?,
        None => EmployeeConsole::from_config(&ClientConfig::default())?,
    };
    let confirm = |prompt: &str| {
        tracing::info!("{prompt} -> yes");
        true
    };

    console.activate().await;
    render(&console.view().await);

    let intents = [
        ConsoleIntent::OpenCreate,
        ConsoleIntent::ChangeField {
            field: FormField::Name,
            value: "Cy Okafor".to_string(),
        },
        ConsoleIntent::ChangeField {
            field: FormField::Email,
            value: "cy@example.com".to_string(),
        },
        ConsoleIntent::ChangeField {
            field: FormField::Department,
            value: "Support".to_string(),
        },
        ConsoleIntent::Submit,
        ConsoleIntent::Delete { id: 1 },
    ];

    for intent in intents {
        let result = console.dispatch(intent.clone(), &confirm).await;
        if result.success {
            tracing::info!(?intent, "{}", result.message);
        } else {
            tracing::error!(?intent, "{}", result.message);
        }
    }

    render(&console.view().await);
    Ok(())
}

fn render(view: &ConsoleView) {
    if let Some(error) = &view.banner {
        tracing::error!("{error}");
    }
    for employee in &view.collection.employees {
        tracing::info!(
            id = ?employee.id,
            position = %employee.position,
            department = %employee.department,
            salary = employee.salary,
            hire_date = %employee.hire_date,
            "{} <{}>",
            employee.name,
            employee.email
        );
    }
}
