use crate::record::Record;

/// Most entries of each list printed in a summary
pub const SUMMARY_LIST_LIMIT: usize = 50;

fn entry(key: &str, value: String) -> String {
    format!("{key} : {value}")
}

/// A plain text version of a lookup response, one `KEY : value` per line. Absent values
/// print as nothing, and each list section prints at most [SUMMARY_LIST_LIMIT] entries.
pub fn legacy_summary(d: &Record) -> String {
    let mut lines: Vec<String> = Vec::new();
    let text = |key: &str| d.text(key).unwrap_or_default();

    if let Some(dni) = d.text("nuDni") {
        lines.push(entry("DNI", dni));
    }
    if let Some(surnames) = d.join(&["apePaterno", "apeMaterno"], " ") {
        lines.push(entry("APELLIDOS", surnames));
    }
    if let Some(names) = d.text("preNombres") {
        lines.push(entry("NOMBRES", names));
    }
    if let Some(sex) = d.text("sexo") {
        lines.push(entry("GENERO", sex));
    }
    lines.push(entry("FECHA NACIMIENTO", text("feNacimiento")));
    if ["depaNacimiento", "provNacimiento", "distNacimiento"]
        .iter()
        .any(|key| d.text(key).is_some())
    {
        lines.push(entry("DEPARTAMENTO", text("depaNacimiento")));
        lines.push(entry("PROVINCIA", text("provNacimiento")));
        lines.push(entry("DISTRITO", text("distNacimiento")));
    }
    for (key, field) in [
        ("GRADO INSTRUCCION", "gradoInstruccion"),
        ("ESTADO CIVIL", "estadoCivil"),
        ("ESTATURA", "estatura"),
        ("FECHA INSCRIPCION", "feInscripcion"),
        ("FECHA EMISION", "feEmision"),
        ("FECHA CADUCIDAD", "feCaducidad"),
        ("FECHA FALLECIMIENTO", "feFallecimiento"),
        ("PADRE", "nomPadre"),
        ("MADRE", "nomMadre"),
    ] {
        lines.push(entry(key, text(field)));
    }

    lines.push("DIRECCIÓN:".to_string());
    for (key, field) in [
        ("DEPARTAMENTO", "depaDireccion"),
        ("PROVINCIA", "provDireccion"),
        ("DISTRITO", "distDireccion"),
        ("DIRECCION", "desDireccion"),
    ] {
        lines.push(entry(key, text(field)));
    }

    lines.push("UBICACION:".to_string());
    for (key, field) in [
        ("UBIGEO RENIEC", "ubigeo_reniec"),
        ("UBIGEO INEI", "ubigeo_inei"),
        ("UBIGEO SUNAT", "ubigeo_sunat"),
        ("CODIGO POSTAL", "codigo_postal"),
    ] {
        lines.push(entry(key, d.path(&["ubicacion", field]).unwrap_or_default()));
    }

    lines.push("ACTAS REGISTRADAS:".to_string());
    for key in ["MATRIMONIO", "NACIMIENTO", "DEFUNCION"] {
        let count = d
            .path(&["actasRegistradas", key])
            .unwrap_or_else(|| "0".to_string());
        lines.push(entry(key, count));
    }

    let family = d.list("familiares");
    if !family.is_empty() {
        lines.push(format!("--- FAMILIARES ({}) ---", family.len()));
        for f in family.iter().take(SUMMARY_LIST_LIMIT) {
            for key in ["NOMBRE", "DNI", "VINCULO", "TIPO"] {
                lines.push(entry(key, f.text(key).unwrap_or_default()));
            }
            lines.push("---".to_string());
        }
    }

    let jobs = d.list("infoLaboral");
    if !jobs.is_empty() {
        lines.push("--- HISTORIAL LABORAL (resumen) ---".to_string());
        for r in jobs.iter().take(SUMMARY_LIST_LIMIT) {
            lines.push(entry("DNI", text("nuDni")));
            for key in ["RUC", "EMPRESA", "SITUACION", "SUELDO", "PERIODO"] {
                lines.push(entry(key, r.text(key).unwrap_or_default()));
            }
            lines.push("---".to_string());
        }
    }

    let phones = d.list("telefonos");
    if !phones.is_empty() {
        lines.push(format!("--- TELEFONOS ({}) ---", phones.len()));
        for t in phones.iter().take(SUMMARY_LIST_LIMIT) {
            for key in ["TELEFONO", "PLAN", "FUENTE", "PERIODO"] {
                lines.push(entry(key, t.text(key).unwrap_or_default()));
            }
        }
    }

    let positions = d.list("cargos");
    if !positions.is_empty() {
        lines.push("--- CARGOS Y EMPRESAS ---".to_string());
        let name = d
            .join(&["apePaterno", "apeMaterno", "preNombres"], " ")
            .unwrap_or_default();
        for c in positions.iter().take(SUMMARY_LIST_LIMIT) {
            lines.push(format!("NOMBRE : {name}").trim().to_string());
            for (key, field) in [
                ("RUC", "RUC"),
                ("RAZON SOCIAL", "RAZON_SOCIAL"),
                ("CARGO", "CARGO"),
                ("DESDE", "DESDE"),
            ] {
                lines.push(entry(key, c.text(field).unwrap_or_default()));
            }
            lines.push("---".to_string());
        }
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn summary_lists_fields_and_sections() {
        let d = Record::from_value(json!({
            "nuDni": "12345678",
            "apePaterno": "QUISPE",
            "apeMaterno": "MAMANI",
            "estatura": 165,
            "actasRegistradas": { "NACIMIENTO": 2 },
            "telefonos": [{ "TELEFONO": "987654321", "PLAN": "POSTPAGO" }]
        }))
        .unwrap();
        let summary = legacy_summary(&d);
        let lines: Vec<&str> = summary.lines().collect();

        assert_eq!(lines[0], "DNI : 12345678");
        assert_eq!(lines[1], "APELLIDOS : QUISPE MAMANI");
        assert_eq!(lines[2], "FECHA NACIMIENTO : ");
        assert!(lines.contains(&"ESTATURA : 165"));
        assert!(lines.contains(&"NACIMIENTO : 2"));
        assert!(lines.contains(&"MATRIMONIO : 0"));
        assert!(lines.contains(&"--- TELEFONOS (1) ---"));
        assert!(lines.contains(&"PLAN : POSTPAGO"));
        assert!(!summary.contains("FAMILIARES"));
    }

    #[test]
    fn long_lists_are_capped() {
        let family: Vec<_> = (0..60).map(|i| json!({ "NOMBRE": format!("P{i}") })).collect();
        let d = Record::from_value(json!({ "familiares": family })).unwrap();
        let summary = legacy_summary(&d);
        assert!(summary.contains("--- FAMILIARES (60) ---"));
        assert!(summary.contains("NOMBRE : P49"));
        assert!(!summary.contains("NOMBRE : P50"));
    }
}
