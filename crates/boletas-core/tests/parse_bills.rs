use std::str::FromStr;

use boletas_core::{
    compare_bills, BillExtractor, BillParser, BoletasConfig, Category, DiffStatus, ParsedBill,
    ProviderId,
};
use chrono::NaiveDate;
use pretty_assertions::assert_eq;
use rust_decimal::Decimal;

fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

fn parse(text: &str) -> ParsedBill {
    BillParser::new().unwrap().extract_from_text(text).unwrap()
}

const MARCH_STATEMENT: &str = "MIS EXPENSAS
101 | PISO 5 A | JUAN PEREZ
EXPENSAS MARZO/2024
A PAGAR A PAGAR 1.000,00 500,00
TOTAL A PAGAR 1.500,00";

#[test]
fn expensas_statement_end_to_end() {
    let bill = parse(MARCH_STATEMENT);

    assert_eq!(bill.category, Some(Category::Hoa));
    assert_eq!(bill.provider_id, Some(ProviderId::Expensas));
    assert_eq!(bill.total_amount, Some(dec("1500.00")));
    assert_eq!(bill.currency.as_deref(), Some("ARS"));

    let details = bill.hoa_details.as_ref().unwrap();
    assert_eq!(details.unit_code, "101");
    assert_eq!(details.unit_label.as_deref(), Some("PISO 5 A"));
    assert_eq!(details.owner_name.as_deref(), Some("JUAN PEREZ"));
    assert_eq!(details.period_year, 2024);
    assert_eq!(details.period_month, 3);
    assert_eq!(details.period_label, "MARZO/2024");
    assert_eq!(details.first_due_amount, Some(dec("1000.00")));
    assert_eq!(details.second_due_amount, Some(dec("500.00")));
    assert_eq!(details.total_to_pay_unit, dec("1500.00"));
    assert_eq!(bill.total_amount, Some(details.total_to_pay_unit));
}

#[test]
fn expensas_without_unit_code_keeps_category() {
    let bill = parse("MIS EXPENSAS\nEXPENSAS MARZO/2024\nTOTAL A PAGAR 1.500,00");

    assert_eq!(bill.category, Some(Category::Hoa));
    assert_eq!(bill.hoa_details, None);
    // Generic amount extraction takes over.
    assert_eq!(bill.total_amount, Some(dec("1500.00")));
}

#[test]
fn duplicated_rubro_total_is_reported_once() {
    let text = format!(
        "{MARCH_STATEMENT}\n3 LIMPIEZA\nTOTAL RUBRO 3 1.234,56\nTOTAL RUBRO 3 1.234,56"
    );
    let bill = parse(&text);
    let rubros = &bill.hoa_details.unwrap().rubros;

    assert_eq!(rubros.len(), 1);
    assert_eq!(rubros[0].rubro_number, 3);
    assert_eq!(rubros[0].label, "LIMPIEZA");
}

#[test]
fn edesur_bill() {
    let text = "EDESUR S.A.
Período 10/02/2024 al 11/03/2024
1º Vencimiento: 25/03/2024
2º Vencimiento: 04/04/2024
Emitida 14/03/2024
Total a pagar $ 23.456,78";
    let bill = parse(text);

    assert_eq!(bill.provider_id, Some(ProviderId::Edesur));
    assert_eq!(bill.provider_name.as_deref(), Some("EDESUR S.A."));
    assert_eq!(bill.category, Some(Category::Service));
    assert_eq!(bill.total_amount, Some(dec("23456.78")));
    assert_eq!(bill.due_date, NaiveDate::from_ymd_opt(2024, 3, 25));
    assert_eq!(bill.period_start, NaiveDate::from_ymd_opt(2024, 2, 10));
    assert_eq!(bill.hoa_details, None);
}

#[test]
fn visa_needs_account_statement_phrase() {
    assert_eq!(parse("Pagá con VISA en cuotas").provider_id, None);

    let bill = parse("VISA\nRESUMEN DE CUENTA\nSALDO ACTUAL 45.000,00");
    assert_eq!(bill.provider_id, Some(ProviderId::Visa));
    assert_eq!(bill.category, Some(Category::CreditCard));
}

#[test]
fn json_shape_keeps_nulls() {
    let bill = parse("texto sin datos");
    let json = serde_json::to_value(&bill).unwrap();

    for field in [
        "providerId",
        "providerName",
        "totalAmount",
        "currency",
        "issueDate",
        "dueDate",
        "periodStart",
        "periodEnd",
        "hoaDetails",
    ] {
        assert!(json[field].is_null(), "{field} should be null");
    }
    assert_eq!(json["category"], "other");
    assert_eq!(json["rawText"], "texto sin datos");
}

#[test]
fn json_shape_of_statement() {
    let json = serde_json::to_value(parse(MARCH_STATEMENT)).unwrap();

    assert_eq!(json["providerId"], "expensas");
    assert_eq!(json["category"], "hoa");
    assert_eq!(json["totalAmount"], 1500.0);
    assert_eq!(json["hoaDetails"]["unitCode"], "101");
    assert_eq!(json["hoaDetails"]["periodMonth"], 3);
    assert_eq!(json["hoaDetails"]["firstDueAmount"], 1000.0);
    assert!(json["hoaDetails"]["buildingCode"].is_null());
    assert!(json["hoaDetails"]["rubros"].as_array().unwrap().is_empty());
}

#[test]
fn parsed_bill_round_trips_through_json() {
    let bill = parse(MARCH_STATEMENT);
    let json = serde_json::to_string(&bill).unwrap();
    let back: ParsedBill = serde_json::from_str(&json).unwrap();
    assert_eq!(back, bill);
}

#[test]
fn compare_two_periods() {
    let previous = parse(&format!(
        "{MARCH_STATEMENT}\n1 SUELDOS\nTOTAL RUBRO 1 100.000,00\n2 LIMPIEZA\nTOTAL RUBRO 2 20.000,00"
    ));
    let current = parse(
        "MIS EXPENSAS
101 | PISO 5 A | JUAN PEREZ
EXPENSAS ABRIL/2024
TOTAL A PAGAR 1.700,00
1 SUELDOS
TOTAL RUBRO 1 110.000,00
2 LIMPIEZA
TOTAL RUBRO 2 20.000,00",
    );

    let comparison = compare_bills(&current, &previous).unwrap();
    assert_eq!(comparison.current_period, "2024-04");
    assert_eq!(comparison.previous_period, "2024-03");
    assert_eq!(comparison.rubro_diffs[0].rubro_number, 1);
    assert_eq!(comparison.rubro_diffs[0].status, DiffStatus::Increased);
    assert_eq!(comparison.rubro_diffs[0].diff_percent, Some(dec("10.00")));
    assert_eq!(comparison.rubro_diffs[1].status, DiffStatus::Unchanged);
}

#[test]
fn configured_catalog_adds_provider() {
    let config: BoletasConfig = serde_json::from_str(
        r#"{
            "catalog": {
                "providers": [
                    {"keyword": "NATURGY", "provider_id": "naturgy", "provider_name": "Naturgy BAN"}
                ]
            }
        }"#,
    )
    .unwrap();

    let parser = BillParser::with_config(config).unwrap();
    let bill = parser.extract_from_text("NATURGY BAN S.A.\nTOTAL A PAGAR 3.000,00").unwrap();

    assert_eq!(bill.provider_id, Some(ProviderId::Other("naturgy".to_string())));
    assert_eq!(bill.category, Some(Category::Other));
    assert_eq!(bill.total_amount, Some(dec("3000.00")));
}
