//! Coordinator behavior over an in-memory backend.

mod support;

use pretty_assertions::assert_eq;
use rstest::rstest;
use serde_json::json;
use support::{Call, Failure, MemoryApi};
use vitrina_core::Entity;
use vitrina_view::{AlertLevel, Coordinator, FormMode, LoadState, ViewError};

fn fill(coordinator: &mut Coordinator<MemoryApi>, values: &[(&str, &str)]) {
    for (field, value) in values {
        coordinator.set(field, *value).unwrap();
    }
}

fn rex(id: i64) -> Entity {
    Entity::new(id)
        .with("nombre", "Rex")
        .with("raza", "Labrador")
        .with("edad", 3)
}

#[tokio::test]
async fn animals_scenario() {
    let mut view = Coordinator::new(MemoryApi::new("animales"));
    view.mount().await.unwrap();
    assert_eq!(view.list().placeholder(), Some("No hay animales registrados"));

    fill(&mut view, &[("nombre", "Rex"), ("raza", "Labrador"), ("edad", "3")]);
    let created = view.submit().await.unwrap().expect("echoed record");
    assert_eq!(created.id, 1);
    assert_eq!(created.field("edad"), Some(&json!(3)));

    let rows = view.list().entities();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].text("nombre"), "Rex");
    assert!(view.list().placeholder().is_none());
    assert_eq!(view.api().calls(), vec![Call::List, Call::Create, Call::List]);

    let pending = view.request_delete(1).unwrap();
    assert!(pending.prompt.contains("Rex"));
    view.confirm_delete().await.unwrap();

    assert!(view.list().is_empty());
    assert_eq!(view.list().placeholder(), Some("No hay animales registrados"));
    assert_eq!(view.api().calls()[3..].to_vec(), vec![Call::Remove(1), Call::List]);
}

#[tokio::test]
async fn invalid_isbn_never_reaches_the_server() {
    let mut view = Coordinator::new(MemoryApi::new("libros"));
    view.mount().await.unwrap();
    fill(&mut view, &[("isbn", "123"), ("titulo", "Rayuela"), ("autor", "Cortázar")]);

    let err = view.submit().await.unwrap_err();
    assert!(matches!(err, ViewError::Validation(_)));
    assert_eq!(view.api().mutations(), 0);
    assert_eq!(
        view.form().errors().get("isbn"),
        Some("El ISBN debe tener 10 o 13 dígitos numéricos")
    );
    assert_eq!(view.form().draft().get("titulo"), Some("Rayuela"));
    assert_eq!(view.alerts()[0].level, AlertLevel::Warning);
}

#[rstest]
#[case("animales", &[("nombre", "Luna"), ("raza", "Siamés"), ("edad", "2")])]
#[case("productos", &[("nombre", "Café"), ("tipo", "Bebida"), ("precio", "45.5")])]
#[case("libros", &[("isbn", "9780307474728"), ("titulo", "Rayuela"), ("autor", "Cortázar")])]
#[case("ventas", &[("cliente", "Ana"), ("producto", "Pan"), ("cantidad", "2"), ("precio", "12")])]
#[tokio::test]
async fn created_record_appears_in_list(
    #[case] resource: &str,
    #[case] values: &[(&str, &str)],
) {
    let mut view = Coordinator::new(MemoryApi::new(resource));
    view.mount().await.unwrap();
    fill(&mut view, values);

    let created = view.submit().await.unwrap().expect("echoed record");
    assert_eq!(view.api().mutations(), 1);
    assert_eq!(view.list().find(created.id), Some(&created));
    assert_eq!(view.form().mode(), FormMode::Create);
}

#[tokio::test]
async fn edit_then_update_replaces_row() {
    let api = MemoryApi::new("animales");
    api.seed(rex(1));
    let mut view = Coordinator::new(api);
    view.mount().await.unwrap();

    view.edit(1).unwrap();
    assert_eq!(view.form().mode(), FormMode::Edit { id: 1 });
    assert!(view.list().rows()[0].editing);
    assert_eq!(view.form().draft().get("raza"), Some("Labrador"));

    view.set("edad", "4").unwrap();
    let updated = view.submit().await.unwrap().expect("echoed record");
    assert_eq!(updated.field("edad"), Some(&json!(4)));

    assert_eq!(view.form().mode(), FormMode::Create);
    assert!(view.editing().is_none());
    assert!(view.list().rows().iter().all(|row| !row.editing));
    assert_eq!(view.list().find(1).unwrap().text("edad"), "4");
    assert_eq!(view.api().calls()[1..].to_vec(), vec![Call::Update(1), Call::List]);
}

#[tokio::test]
async fn cancel_edit_returns_to_create() {
    let api = MemoryApi::new("animales");
    api.seed(rex(1));
    let mut view = Coordinator::new(api);
    view.mount().await.unwrap();

    view.edit(1).unwrap();
    view.cancel_edit();
    assert_eq!(view.form().mode(), FormMode::Create);
    assert_eq!(view.form().draft().get("nombre"), Some(""));
    assert_eq!(view.api().mutations(), 0);
}

#[tokio::test]
async fn server_rejection_keeps_draft() {
    let api = MemoryApi::new("animales");
    let mut view = Coordinator::new(api);
    view.mount().await.unwrap();
    fill(&mut view, &[("nombre", "Rex"), ("raza", "Labrador"), ("edad", "3")]);

    view.api().fail_next(Failure::Rejected(400, "Animal already exists"));
    let err = view.submit().await.unwrap_err();

    assert!(matches!(err, ViewError::Client(_)));
    assert_eq!(view.form().draft().get("nombre"), Some("Rex"));
    assert!(view.list().is_empty());
    let alerts = view.take_alerts();
    assert_eq!(alerts.len(), 1);
    assert_eq!(alerts[0].level, AlertLevel::Error);
    assert!(alerts[0].message.contains("Animal already exists"));
}

#[tokio::test]
async fn failed_refresh_keeps_previous_rows() {
    let api = MemoryApi::new("animales");
    api.seed(rex(1));
    let mut view = Coordinator::new(api);
    view.mount().await.unwrap();

    view.api().fail_next(Failure::Http(500, "Internal Server Error"));
    assert!(view.refresh().await.is_err());

    assert_eq!(view.list().entities().len(), 1);
    assert!(matches!(view.list().state(), LoadState::Failed(_)));
    assert_eq!(view.alerts()[0].level, AlertLevel::Error);
}

#[tokio::test]
async fn mount_fetches_once() {
    let mut view = Coordinator::new(MemoryApi::new("cursos"));
    view.mount().await.unwrap();
    view.mount().await.unwrap();
    assert_eq!(view.api().calls(), vec![Call::List]);
}

#[tokio::test]
async fn cancelled_delete_makes_no_request() {
    let api = MemoryApi::new("animales");
    api.seed(rex(1));
    let mut view = Coordinator::new(api);
    view.mount().await.unwrap();

    view.request_delete(1).unwrap();
    assert_eq!(view.cancel_delete().map(|p| p.id), Some(1));
    assert!(matches!(
        view.confirm_delete().await,
        Err(ViewError::NothingToConfirm)
    ));
    assert_eq!(view.api().mutations(), 0);
    assert_eq!(view.list().entities().len(), 1);
}

#[tokio::test]
async fn deleting_edited_row_resets_form() {
    let api = MemoryApi::new("animales");
    api.seed(rex(1));
    api.seed(rex(2).with("nombre", "Toby"));
    let mut view = Coordinator::new(api);
    view.mount().await.unwrap();

    view.edit(2).unwrap();
    view.request_delete(2).unwrap();
    view.confirm_delete().await.unwrap();

    assert_eq!(view.form().mode(), FormMode::Create);
    assert!(view.editing().is_none());
    assert_eq!(view.list().entities().iter().map(|e| e.id).collect::<Vec<_>>(), vec![1]);
}

#[tokio::test]
async fn unknown_row_is_reported() {
    let mut view = Coordinator::new(MemoryApi::new("animales"));
    view.mount().await.unwrap();
    assert!(matches!(view.edit(99), Err(ViewError::NoSuchRow(99))));
    assert!(matches!(view.request_delete(99), Err(ViewError::NoSuchRow(99))));
}

#[tokio::test]
async fn failed_delete_keeps_row() {
    let api = MemoryApi::new("animales");
    api.seed(rex(1));
    let mut view = Coordinator::new(api);
    view.mount().await.unwrap();

    view.request_delete(1).unwrap();
    view.api().fail_next(Failure::Http(404, "Animal not found"));
    let err = view.confirm_delete().await.unwrap_err();

    assert!(err.to_string().contains("Animal not found"));
    assert_eq!(view.list().entities().len(), 1);
    assert!(!view.modal().is_open());
}

#[tokio::test]
async fn acknowledged_write_without_record_still_refreshes() {
    let mut view = Coordinator::new(MemoryApi::new("contactos").silent_writes());
    view.mount().await.unwrap();
    view.take_alerts();

    fill(&mut view, &[("nombre", "Ana"), ("telefono", "6865550101")]);
    assert_eq!(view.submit().await.unwrap(), None);

    assert_eq!(view.list().entities().len(), 1);
    assert_eq!(view.form().mode(), FormMode::Create);
    let alerts = view.take_alerts();
    assert_eq!(alerts.len(), 1);
    assert_eq!(alerts[0].level, AlertLevel::Success);
    assert_eq!(
        view.api().calls(),
        vec![Call::List, Call::Create, Call::List]
    );
}
