//! Macro-generated test suite for `ProductService` contract validation.
//!
//! The `product_service_tests!` macro generates a test module that validates
//! any `ProductService` implementation against the full contract: CRUD,
//! visibility, search, category scoping, ordering, pagination and concurrent
//! access.
//!
//! # Usage
//!
//! ```rust,ignore
//! #[macro_use]
//! mod storage_harness;
//!
//! use storage_harness::*;
//! use market::storage::InMemoryProductService;
//!
//! product_service_tests!(InMemoryProductService::new());
//! ```

/// Generate a full `ProductService` conformance test suite.
///
/// `$factory` must be an expression that evaluates to an empty store
/// implementing `ProductService + Clone + 'static`. It is re-evaluated for
/// each test to ensure isolation.
#[macro_export]
macro_rules! product_service_tests {
    ($factory:expr) => {
        mod product_service_contract_tests {
            use super::*;
            use market::core::{
                Category, PAGE_SIZE, PageNumber, ProductQuery, ProductService,
            };
            use uuid::Uuid;

            // ==================================================================
            // CRUD
            // ==================================================================

            #[tokio::test]
            async fn test_create_and_get() {
                let service = $factory;
                let created = service.create(ryzen()).await.unwrap();
                assert_same_data(&created, &ryzen());
                assert_eq!(created.created_at, created.updated_at);

                let fetched = service.get(&created.id).await.unwrap();
                assert_eq!(fetched, Some(created));
            }

            #[tokio::test]
            async fn test_get_nonexistent() {
                let service = $factory;
                assert!(service.get(&Uuid::new_v4()).await.unwrap().is_none());
            }

            #[tokio::test]
            async fn test_price_bounds_are_stored_exactly() {
                let service = $factory;
                for literal in ["0.00", "0.01", "99999.99"] {
                    let data = market::core::ProductData {
                        price: price(literal),
                        ..product_data("Bound", Category::Other, 1)
                    };
                    let created = service.create(data).await.unwrap();
                    let fetched = service.get(&created.id).await.unwrap().unwrap();
                    assert_eq!(fetched.price, price(literal));
                }
            }

            #[tokio::test]
            async fn test_update_replaces_user_fields() {
                let service = $factory;
                let created = service.create(ryzen()).await.unwrap();

                let replacement = market::core::ProductData {
                    name: "Ryzen 7".to_string(),
                    description: None,
                    image: None,
                    category: Category::Other,
                    quantity: 0,
                    price: price("299.00"),
                };
                let updated = service
                    .update(&created.id, replacement.clone())
                    .await
                    .unwrap()
                    .expect("product exists");

                assert_eq!(updated.id, created.id);
                assert_eq!(updated.created_at, created.created_at);
                assert!(updated.updated_at >= created.updated_at);
                assert_same_data(&updated, &replacement);

                let fetched = service.get(&created.id).await.unwrap().unwrap();
                assert_eq!(fetched, updated);
            }

            #[tokio::test]
            async fn test_update_nonexistent() {
                let service = $factory;
                let result = service.update(&Uuid::new_v4(), ryzen()).await.unwrap();
                assert!(result.is_none());
            }

            #[tokio::test]
            async fn test_delete_existing() {
                let service = $factory;
                let created = service.create(ryzen()).await.unwrap();

                assert!(service.delete(&created.id).await.unwrap());
                assert!(service.get(&created.id).await.unwrap().is_none());
            }

            #[tokio::test]
            async fn test_delete_nonexistent() {
                let service = $factory;
                assert!(!service.delete(&Uuid::new_v4()).await.unwrap());
            }

            // ==================================================================
            // Visibility & search
            // ==================================================================

            #[tokio::test]
            async fn test_out_of_stock_hidden_but_reachable() {
                let service = $factory;
                let hidden = service
                    .create(product_data("Hidden", Category::Cpu, 0))
                    .await
                    .unwrap();
                service
                    .create(product_data("Shown", Category::Cpu, 1))
                    .await
                    .unwrap();

                let all = ProductQuery::all();
                assert_eq!(service.count(&all).await.unwrap(), 1);
                let listed = service.find(&all, 0, PAGE_SIZE).await.unwrap();
                assert_eq!(names(&listed), vec!["Shown"]);

                assert!(service.get(&hidden.id).await.unwrap().is_some());
            }

            #[tokio::test]
            async fn test_search_name_or_description_case_insensitive() {
                let service = $factory;
                service.create(described("Ryzen 9", "AMD processor", 3)).await.unwrap();
                service.create(described("Core i9", "Intel processor", 3)).await.unwrap();
                service.create(product_data("Ryzen 5", Category::Cpu, 0)).await.unwrap();
                service.create(product_data("No description", Category::Cpu, 2)).await.unwrap();

                let by_name = ProductQuery::all().with_term(Some("rYzEn"));
                let found = service.find(&by_name, 0, PAGE_SIZE).await.unwrap();
                assert_eq!(names(&found), vec!["Ryzen 9"]);

                let by_description = ProductQuery::all().with_term(Some("PROCESSOR"));
                let found = service.find(&by_description, 0, PAGE_SIZE).await.unwrap();
                assert_eq!(names(&found), vec!["Core i9", "Ryzen 9"]);
                assert_eq!(service.count(&by_description).await.unwrap(), 2);

                let nothing = ProductQuery::all().with_term(Some("geforce"));
                assert_eq!(service.count(&nothing).await.unwrap(), 0);
            }

            #[tokio::test]
            async fn test_search_term_is_literal() {
                let service = $factory;
                service.create(product_data("100% copper", Category::Other, 1)).await.unwrap();
                service.create(product_data("1000 W PSU", Category::Other, 1)).await.unwrap();

                let query = ProductQuery::all().with_term(Some("0%"));
                let found = service.find(&query, 0, PAGE_SIZE).await.unwrap();
                assert_eq!(names(&found), vec!["100% copper"]);
            }

            #[tokio::test]
            async fn test_category_scope() {
                let service = $factory;
                service.create(product_data("RTX 4090", Category::Gpu, 1)).await.unwrap();
                service.create(product_data("Ryzen 9", Category::Cpu, 1)).await.unwrap();
                service.create(product_data("RX 7900", Category::Gpu, 0)).await.unwrap();

                let gpus = ProductQuery::all().in_category(Category::Gpu);
                let found = service.find(&gpus, 0, PAGE_SIZE).await.unwrap();
                assert_eq!(names(&found), vec!["RTX 4090"]);

                let scoped_search = ProductQuery::all()
                    .in_category(Category::Gpu)
                    .with_term(Some("ryzen"));
                assert_eq!(service.count(&scoped_search).await.unwrap(), 0);
            }

            #[tokio::test]
            async fn test_order_by_name_then_id() {
                let service = $factory;
                service.create(product_data("beta", Category::Other, 1)).await.unwrap();
                let first = service.create(product_data("Alpha", Category::Other, 1)).await.unwrap();
                let second = service.create(product_data("Alpha", Category::Other, 1)).await.unwrap();

                let found = service.find(&ProductQuery::all(), 0, PAGE_SIZE).await.unwrap();
                assert_eq!(names(&found), vec!["Alpha", "Alpha", "beta"]);

                let (low, high) = if first.id < second.id {
                    (first.id, second.id)
                } else {
                    (second.id, first.id)
                };
                assert_eq!(found[0].id, low);
                assert_eq!(found[1].id, high);
            }

            #[tokio::test]
            async fn test_categories_in_stock() {
                let service = $factory;
                assert!(service.categories_in_stock().await.unwrap().is_empty());

                service.create(product_data("Case", Category::Other, 4)).await.unwrap();
                service.create(product_data("U2720Q", Category::Monitor, 1)).await.unwrap();
                service.create(product_data("Ryzen 9", Category::Cpu, 0)).await.unwrap();

                assert_eq!(
                    service.categories_in_stock().await.unwrap(),
                    vec![Category::Monitor, Category::Other]
                );
            }

            // ==================================================================
            // Pagination
            // ==================================================================

            #[tokio::test]
            async fn test_find_offset_and_limit() {
                let service = $factory;
                for data in numbered_batch(5) {
                    service.create(data).await.unwrap();
                }

                let found = service.find(&ProductQuery::all(), 2, 2).await.unwrap();
                assert_eq!(names(&found), vec!["Part 02", "Part 03"]);

                let past_end = service.find(&ProductQuery::all(), 10, 2).await.unwrap();
                assert!(past_end.is_empty());
            }

            #[tokio::test]
            async fn test_search_pages() {
                let service = $factory;
                for data in numbered_batch(23) {
                    service.create(data).await.unwrap();
                }
                let all = ProductQuery::all();

                let second = service.search(&all, PageNumber::Number(2), PAGE_SIZE).await.unwrap();
                assert_eq!(second.items.len(), 10);
                assert_eq!(second.items[0].name, "Part 10");
                assert_eq!(second.pagination.total, 23);
                assert_eq!(second.pagination.total_pages, 3);
                assert!(second.pagination.has_prev);
                assert!(second.pagination.has_next);

                let last = service.search(&all, PageNumber::Last, PAGE_SIZE).await.unwrap();
                assert_eq!(last.pagination.page, 3);
                assert_eq!(names(&last.items), vec!["Part 20", "Part 21", "Part 22"]);

                assert!(service.search(&all, PageNumber::Number(4), PAGE_SIZE).await.is_err());
            }

            #[tokio::test]
            async fn test_first_page_of_empty_store() {
                let service = $factory;
                let page = service
                    .search(&ProductQuery::all(), PageNumber::default(), PAGE_SIZE)
                    .await
                    .unwrap();

                assert!(page.items.is_empty());
                assert_eq!(page.pagination.page, 1);
                assert_eq!(page.pagination.total_pages, 1);
                assert!(!page.pagination.has_next);
            }

            // ==================================================================
            // Concurrency
            // ==================================================================

            #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
            async fn test_concurrent_access() {
                let service = $factory;
                let s1 = service.clone();
                let s2 = service.clone();

                let h1 = tokio::spawn(async move { s1.create(product_data("A", Category::Cpu, 1)).await });
                let h2 = tokio::spawn(async move { s2.create(product_data("B", Category::Gpu, 1)).await });

                let (r1, r2) = tokio::time::timeout(std::time::Duration::from_secs(30), async {
                    tokio::try_join!(h1, h2).unwrap()
                })
                .await
                .expect("Concurrent creates timed out after 30s");

                let a = r1.unwrap();
                let b = r2.unwrap();

                let all = service.find(&ProductQuery::all(), 0, PAGE_SIZE).await.unwrap();
                let ids: Vec<Uuid> = all.iter().map(|p| p.id).collect();
                assert_eq!(ids.len(), 2);
                assert!(ids.contains(&a.id));
                assert!(ids.contains(&b.id));
            }
        }
    };
}
