use engine::{Engine, EngineError, Upsert};

use crate::{
    ImportEvent, ImportSink, ImportSummary, Kind, ResultImport, Source,
    event::Recorder,
    rows::{Row, parse},
};

/// Fetch the city source and upsert every `code;name` row.
pub async fn import_cities<S: ImportSink + ?Sized>(
    engine: &Engine,
    source: &Source,
    sink: &mut S,
) -> ResultImport<ImportSummary> {
    let body = source.fetch(Kind::City).await?;
    import_city_rows(engine, &body, sink).await
}

/// Upsert already fetched city rows.
pub async fn import_city_rows<S: ImportSink + ?Sized>(
    engine: &Engine,
    body: &str,
    sink: &mut S,
) -> ResultImport<ImportSummary> {
    let mut recorder = Recorder::new(sink);

    for row in parse(body) {
        let fields = match row {
            Row::Fields(fields) => fields,
            Row::Broken(err) => {
                recorder.emit(ImportEvent::Skipped(format!("Skipping unreadable row: {err}")));
                continue;
            }
        };
        let [code, name] = fields.as_slice() else {
            recorder.emit(ImportEvent::Skipped(format!(
                "Skipping malformed row: {fields:?}"
            )));
            continue;
        };

        match engine.get_or_create_city(code, name).await {
            Ok(Upsert::Created(city)) => recorder.emit(ImportEvent::Added(format!(
                "Added city: {} - {}",
                city.code, city.name
            ))),
            Ok(Upsert::Existing(city)) => recorder.emit(ImportEvent::AlreadyExists(format!(
                "City already exists: {} - {}",
                city.code, city.name
            ))),
            Err(EngineError::Validation(reason)) => recorder.emit(ImportEvent::Skipped(
                format!("Skipping invalid row: {fields:?}: {reason}"),
            )),
            Err(err) => return Err(err.into()),
        }
    }

    recorder.emit(ImportEvent::Completed(
        "Cities imported successfully!".to_string(),
    ));
    Ok(recorder.summary)
}
