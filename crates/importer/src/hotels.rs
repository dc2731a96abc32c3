use engine::{Engine, EngineError, Upsert};

use crate::{
    ImportEvent, ImportSink, ImportSummary, Kind, ResultImport, Source,
    event::Recorder,
    rows::{Row, parse},
};

/// Fetch the hotel source and upsert every `city_code;hotel_code;hotel_name`
/// row. Rows whose city is unknown are skipped; no city is ever created here.
pub async fn import_hotels<S: ImportSink + ?Sized>(
    engine: &Engine,
    source: &Source,
    sink: &mut S,
) -> ResultImport<ImportSummary> {
    let body = source.fetch(Kind::Hotel).await?;
    import_hotel_rows(engine, &body, sink).await
}

/// Upsert already fetched hotel rows.
pub async fn import_hotel_rows<S: ImportSink + ?Sized>(
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
        let [city_code, code, name] = fields.as_slice() else {
            recorder.emit(ImportEvent::Skipped(format!(
                "Skipping malformed row: {fields:?}"
            )));
            continue;
        };

        match engine.get_or_create_hotel(city_code, code, name).await {
            Ok(Upsert::Created((hotel, city))) => recorder.emit(ImportEvent::Added(format!(
                "Added hotel: {} ({}) in {}",
                hotel.name, hotel.code, city.name
            ))),
            Ok(Upsert::Existing((_, city))) => recorder.emit(ImportEvent::AlreadyExists(format!(
                "Hotel already exists: {name} ({code}) in {}",
                city.name
            ))),
            Err(EngineError::KeyNotFound(_)) => recorder.emit(ImportEvent::Skipped(format!(
                "City with code {city_code} not found. Skipping hotel: {code} - {name}"
            ))),
            Err(EngineError::Validation(reason)) => recorder.emit(ImportEvent::Skipped(
                format!("Skipping invalid row: {fields:?}: {reason}"),
            )),
            Err(err) => return Err(err.into()),
        }
    }

    recorder.emit(ImportEvent::Completed(
        "Hotels imported successfully!".to_string(),
    ));
    Ok(recorder.summary)
}
