use serde_json::json;

use crate::common::{TestApp, routes};

const UNKNOWN_ID: &str = "0191c2f3-aaaa-7bbb-8ccc-dddddddddddd";

mod creation {
    use super::*;

    #[tokio::test]
    async fn full_payload_round_trips_through_get() {
        let app = TestApp::spawn().await;
        let payload = json!({
            "fileId": "some-blob-id",
            "fileName": "march.pdf",
            "vendor": {
                "name": "Globex Corporation",
                "address": "12 Industrial Way",
                "taxId": "GB123456789",
            },
            "invoice": {
                "number": "INV-2024-0042",
                "date": "2024-03-15",
                "currency": "GBP",
                "subtotal": 1200.0,
                "taxPercent": 20.0,
                "total": 1440.0,
                "poNumber": "PO-777",
                "lineItems": [
                    { "description": "Consulting", "unitPrice": 600.0, "quantity": 2.0, "total": 1200.0 },
                ],
            },
        });

        let created = app.post(routes::INVOICES, &payload).await;
        assert_eq!(created.status, 201, "{}", created.text);
        assert!(created.body["createdAt"].is_string());
        assert!(created.body["updatedAt"].is_string());

        let id = created.body["id"].as_str().unwrap();
        let fetched = app.get(&routes::invoice(id)).await;
        assert_eq!(fetched.status, 200);
        assert_eq!(fetched.body["fileName"], "march.pdf");
        assert_eq!(fetched.body["vendor"], payload["vendor"]);
        assert_eq!(fetched.body["invoice"]["number"], "INV-2024-0042");
        assert_eq!(fetched.body["invoice"]["total"], 1440.0);
        assert_eq!(
            fetched.body["invoice"]["lineItems"][0]["description"],
            "Consulting"
        );
    }

    #[tokio::test]
    async fn missing_vendor_name_is_rejected() {
        let app = TestApp::spawn().await;

        let res = app
            .post(
                routes::INVOICES,
                &json!({ "vendor": { "name": "  " }, "invoice": { "number": "INV-1" } }),
            )
            .await;

        assert_eq!(res.status, 400);
        assert!(res.body["error"].as_str().unwrap().contains("vendor.name"));
    }

    #[tokio::test]
    async fn missing_invoice_number_is_rejected() {
        let app = TestApp::spawn().await;

        let res = app
            .post(
                routes::INVOICES,
                &json!({ "vendor": { "name": "Acme" }, "invoice": { "number": "" } }),
            )
            .await;

        assert_eq!(res.status, 400);
        assert!(res.body["error"].as_str().unwrap().contains("invoice.number"));
    }
}

mod listing {
    use super::*;

    #[tokio::test]
    async fn newest_records_come_first() {
        let app = TestApp::spawn().await;
        app.create_invoice("First Vendor", "INV-1").await;
        app.create_invoice("Second Vendor", "INV-2").await;

        let res = app.get(routes::INVOICES).await;

        assert_eq!(res.status, 200);
        let items = res.body.as_array().unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0]["vendor"]["name"], "Second Vendor");
        assert_eq!(items[1]["vendor"]["name"], "First Vendor");
    }

    #[tokio::test]
    async fn q_matches_vendor_name_case_insensitively() {
        let app = TestApp::spawn().await;
        app.create_invoice("Globex Corporation", "INV-1").await;
        app.create_invoice("Initech", "INV-2").await;

        let res = app.get(&format!("{}?q=gLoBeX", routes::INVOICES)).await;

        assert_eq!(res.status, 200);
        let items = res.body.as_array().unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0]["vendor"]["name"], "Globex Corporation");
    }

    #[tokio::test]
    async fn q_matches_invoice_number_substring() {
        let app = TestApp::spawn().await;
        app.create_invoice("Globex", "INV-2024-0042").await;
        app.create_invoice("Initech", "REF-77").await;

        let res = app.get(&format!("{}?q=2024", routes::INVOICES)).await;

        let items = res.body.as_array().unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0]["invoice"]["number"], "INV-2024-0042");
    }

    #[tokio::test]
    async fn q_without_match_yields_empty_list() {
        let app = TestApp::spawn().await;
        app.create_invoice("Globex", "INV-1").await;

        let res = app.get(&format!("{}?q=nonexistent", routes::INVOICES)).await;

        assert_eq!(res.status, 200);
        assert_eq!(res.body.as_array().unwrap().len(), 0);
    }

    #[tokio::test]
    async fn like_wildcards_in_q_are_literal() {
        let app = TestApp::spawn().await;
        app.create_invoice("100% Juice Co", "INV-1").await;
        app.create_invoice("Plain Vendor", "INV-2").await;

        let res = app.get(&format!("{}?q=100%25", routes::INVOICES)).await;

        let items = res.body.as_array().unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0]["vendor"]["name"], "100% Juice Co");
    }
}

mod update {
    use super::*;

    #[tokio::test]
    async fn patching_only_the_total_preserves_everything_else() {
        let app = TestApp::spawn().await;
        let payload = json!({
            "vendor": { "name": "Globex", "address": "12 Industrial Way" },
            "invoice": {
                "number": "INV-1",
                "currency": "GBP",
                "subtotal": 100.0,
                "total": 120.0,
            },
        });
        let created = app.post(routes::INVOICES, &payload).await;
        let id = created.body["id"].as_str().unwrap().to_string();

        let res = app
            .put(
                &routes::invoice(&id),
                &json!({ "invoice": { "total": 240.0 } }),
            )
            .await;

        assert_eq!(res.status, 200, "{}", res.text);
        assert_eq!(res.body["invoice"]["total"], 240.0);
        assert_eq!(res.body["invoice"]["subtotal"], 100.0);
        assert_eq!(res.body["invoice"]["currency"], "GBP");
        assert_eq!(res.body["invoice"]["number"], "INV-1");
        assert_eq!(res.body["vendor"]["name"], "Globex");
        assert_eq!(res.body["vendor"]["address"], "12 Industrial Way");
        assert!(res.body["updatedAt"].is_string());
    }

    #[tokio::test]
    async fn vendor_object_is_replaced_wholesale() {
        let app = TestApp::spawn().await;
        let created = app
            .post(
                routes::INVOICES,
                &json!({
                    "vendor": { "name": "Globex", "address": "12 Industrial Way" },
                    "invoice": { "number": "INV-1" },
                }),
            )
            .await;
        let id = created.body["id"].as_str().unwrap().to_string();

        let res = app
            .put(
                &routes::invoice(&id),
                &json!({ "vendor": { "name": "Initech" } }),
            )
            .await;

        assert_eq!(res.status, 200);
        assert_eq!(res.body["vendor"]["name"], "Initech");
        assert!(res.body["vendor"].get("address").is_none());
    }

    #[tokio::test]
    async fn empty_vendor_name_is_rejected() {
        let app = TestApp::spawn().await;
        let id = app.create_invoice("Globex", "INV-1").await;

        let res = app
            .put(&routes::invoice(&id), &json!({ "vendor": { "name": "" } }))
            .await;

        assert_eq!(res.status, 400);
    }

    #[tokio::test]
    async fn unknown_id_is_a_404() {
        let app = TestApp::spawn().await;

        let res = app
            .put(
                &routes::invoice(UNKNOWN_ID),
                &json!({ "invoice": { "total": 1.0 } }),
            )
            .await;

        assert_eq!(res.status, 404);
    }

    #[tokio::test]
    async fn updating_a_deleted_record_is_a_404_not_a_storage_error() {
        let app = TestApp::spawn().await;
        let id = app.create_invoice("Globex", "INV-1").await;

        let deleted = app.delete(&routes::invoice(&id)).await;
        assert_eq!(deleted.status, 200);

        let res = app
            .put(
                &routes::invoice(&id),
                &json!({ "invoice": { "total": 1.0 } }),
            )
            .await;

        assert_eq!(res.status, 404);
        assert!(res.body["error"].as_str().unwrap().contains("not found"));
    }
}

mod deletion {
    use super::*;

    #[tokio::test]
    async fn created_record_can_be_deleted_exactly_once() {
        let app = TestApp::spawn().await;
        let id = app.create_invoice("Globex", "INV-1").await;

        let res = app.delete(&routes::invoice(&id)).await;
        assert_eq!(res.status, 200);
        assert_eq!(res.body["ok"], true);

        let gone = app.get(&routes::invoice(&id)).await;
        assert_eq!(gone.status, 404);

        let again = app.delete(&routes::invoice(&id)).await;
        assert_eq!(again.status, 404);
    }

    #[tokio::test]
    async fn malformed_id_is_a_400() {
        let app = TestApp::spawn().await;

        let res = app.delete(&routes::invoice("not-a-uuid")).await;

        assert_eq!(res.status, 400);
    }
}

mod fetch {
    use super::*;

    #[tokio::test]
    async fn malformed_id_is_a_400() {
        let app = TestApp::spawn().await;

        let res = app.get(&routes::invoice("12345")).await;

        assert_eq!(res.status, 400);
    }

    #[tokio::test]
    async fn unknown_id_is_a_404() {
        let app = TestApp::spawn().await;

        let res = app.get(&routes::invoice(UNKNOWN_ID)).await;

        assert_eq!(res.status, 404);
        assert!(res.body["error"].as_str().unwrap().contains("not found"));
    }
}
