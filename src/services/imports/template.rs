use actix_web::{HttpResponse, Result as ActixResult};

pub const TEMPLATE_HEADER: [&str; 4] = ["nisn", "name", "class", "gender"];
pub const TEMPLATE_ROWS: [[&str; 4]; 2] = [
    ["1234567890", "Budi Santoso", "7A", "L"],
    ["0987654321", "Siti Rahayu", "7A", "P"],
];

pub fn render_template() -> Result<Vec<u8>, csv::Error> {
    let mut wtr = csv::Writer::from_writer(vec![]);
    wtr.write_record(TEMPLATE_HEADER)?;
    for row in TEMPLATE_ROWS {
        wtr.write_record(row)?;
    }
    wtr.into_inner().map_err(|e| e.into_error().into())
}

pub async fn download_template() -> ActixResult<HttpResponse> {
    let data = render_template().map_err(actix_web::error::ErrorInternalServerError)?;

    Ok(HttpResponse::Ok()
        .content_type("text/csv; charset=utf-8")
        .insert_header((
            "Content-Disposition",
            "attachment; filename=\"student_import_template.csv\"",
        ))
        .body(data))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::imports::{parse::parse_rows, validate::validate_rows};

    #[test]
    fn test_template_content() {
        let data = render_template().unwrap();
        let text = String::from_utf8(data).unwrap();
        assert_eq!(
            text,
            "nisn,name,class,gender\n1234567890,Budi Santoso,7A,L\n0987654321,Siti Rahayu,7A,P\n"
        );
    }

    #[test]
    fn test_template_imports_cleanly() {
        let data = render_template().unwrap();
        let (valid, invalid) = validate_rows(&parse_rows(&data));
        assert_eq!(valid.len(), 2);
        assert!(invalid.is_empty());
    }
}
