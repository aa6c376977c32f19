use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// `data_processamento` layout.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountRecord {
    #[serde(rename = "codigo")]
    pub code: String,
    #[serde(rename = "tipo")]
    pub account_type: String,
    /// Dotted hierarchy path, e.g. `1.2.3`.
    #[serde(rename = "classificacao")]
    pub classification: String,
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "grau")]
    pub degree: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartOfAccounts {
    #[serde(rename = "empresa")]
    pub company: String,
    #[serde(rename = "contas")]
    pub accounts: Vec<AccountRecord>,
}

/// One extract line: column header to normalized value, in sheet column order.
pub type ExtractRow = Map<String, Value>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractRecord {
    #[serde(rename = "arquivo_origem")]
    pub origin_filename: String,
    #[serde(rename = "data_processamento")]
    pub processed_at: String,
    #[serde(rename = "dados")]
    pub rows: Vec<ExtractRow>,
}

impl ExtractRecord {
    /// Column names in first-seen order across all rows.
    pub fn columns(&self) -> Vec<String> {
        let mut columns: Vec<String> = Vec::new();
        for row in &self.rows {
            for key in row.keys() {
                if !columns.iter().any(|c| c == key) {
                    columns.push(key.clone());
                }
            }
        }
        columns
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_account_uses_persisted_field_names() {
        let account = AccountRecord {
            code: "10".to_string(),
            account_type: "S".to_string(),
            classification: "1.1".to_string(),
            name: "Caixa".to_string(),
            degree: 2,
        };
        let value = serde_json::to_value(&account).unwrap();
        assert_eq!(
            value,
            json!({"codigo": "10", "tipo": "S", "classificacao": "1.1", "nome": "Caixa", "grau": 2})
        );
    }

    #[test]
    fn test_extract_reads_existing_document() {
        let doc = r#"{
            "arquivo_origem": "jan.xlsx",
            "data_processamento": "2024-02-01 09:30:00",
            "dados": [{"Data": "2024-01-05", "Descrição": "PIX", "Valor": -12.5}]
        }"#;
        let record: ExtractRecord = serde_json::from_str(doc).unwrap();
        assert_eq!(record.origin_filename, "jan.xlsx");
        assert_eq!(record.columns(), vec!["Data", "Descrição", "Valor"]);
        assert_eq!(record.rows[0]["Valor"], json!(-12.5));
    }
}
