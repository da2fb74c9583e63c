mod common;

use common::{books, computers, electronics, seeded_provider, seller};
use sellerdb_core::{create_seller_repository, Department, Seller, SellerRepository};
use std::rc::Rc;

fn seed(repo: &dyn SellerRepository, entries: &[(&str, Department)]) {
    for (name, department) in entries {
        let mut record = seller(name, department.clone());
        repo.insert(&mut record).unwrap();
    }
}

fn names(sellers: &[Seller]) -> Vec<&str> {
    sellers.iter().map(|seller| seller.name.as_str()).collect()
}

#[test]
fn find_all_orders_by_name() {
    let provider = seeded_provider();
    let repo = create_seller_repository(&provider).unwrap();
    seed(
        repo.as_ref(),
        &[
            ("Martha", books()),
            ("Alex", computers()),
            ("Donald", books()),
            ("Bob", electronics()),
        ],
    );

    let sellers = repo.find_all().unwrap();
    assert_eq!(names(&sellers), vec!["Alex", "Bob", "Donald", "Martha"]);
    assert_eq!(repo.find_all().unwrap(), sellers);
}

#[test]
fn equal_names_keep_insertion_order() {
    let provider = seeded_provider();
    let repo = create_seller_repository(&provider).unwrap();
    seed(
        repo.as_ref(),
        &[("Sam", electronics()), ("Ann", books()), ("Sam", books())],
    );

    let sellers = repo.find_all().unwrap();
    assert_eq!(names(&sellers), vec!["Ann", "Sam", "Sam"]);
    assert!(sellers[1].id < sellers[2].id);
    assert_eq!(sellers[1].department.name, "Electronics");
    assert_eq!(sellers[2].department.name, "Books");
}

#[test]
fn sellers_in_one_result_share_department_instances() {
    let provider = seeded_provider();
    let repo = create_seller_repository(&provider).unwrap();
    seed(
        repo.as_ref(),
        &[("Alex", books()), ("Bob", computers()), ("Carl", books())],
    );

    let sellers = repo.find_all().unwrap();
    let (alex, bob, carl) = (&sellers[0], &sellers[1], &sellers[2]);

    assert!(Rc::ptr_eq(&alex.department, &carl.department));
    assert!(!Rc::ptr_eq(&alex.department, &bob.department));
    assert_eq!(alex.department.id, alex.department_id());
    assert_eq!(bob.department.name, "Computers");
}

#[test]
fn find_by_department_is_the_matching_subset_of_find_all() {
    let provider = seeded_provider();
    let repo = create_seller_repository(&provider).unwrap();
    seed(
        repo.as_ref(),
        &[
            ("Greg", books()),
            ("Alex", computers()),
            ("Donald", books()),
            ("Bob", books()),
            ("Eve", electronics()),
        ],
    );

    let all = repo.find_all().unwrap();
    let expected = all
        .iter()
        .filter(|seller| seller.department_id() == books().id)
        .cloned()
        .collect::<Vec<_>>();

    let in_books = repo.find_by_department(&books()).unwrap();
    assert_eq!(in_books, expected);
    assert_eq!(names(&in_books), vec!["Bob", "Donald", "Greg"]);
    assert!(in_books
        .windows(2)
        .all(|pair| Rc::ptr_eq(&pair[0].department, &pair[1].department)));
}

#[test]
fn find_by_department_without_sellers_is_empty() {
    let provider = seeded_provider();
    let repo = create_seller_repository(&provider).unwrap();
    seed(repo.as_ref(), &[("Alex", books())]);

    assert!(repo.find_by_department(&electronics()).unwrap().is_empty());
}

#[test]
fn find_all_on_empty_table_is_empty() {
    let provider = seeded_provider();
    let repo = create_seller_repository(&provider).unwrap();

    assert!(repo.find_all().unwrap().is_empty());
}
