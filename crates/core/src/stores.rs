//! Demo store directory and mock per-store availability. Real inventory
//! lookup is out of scope; the figures here are static fixtures.

use crate::domain::product::ProductId;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Store {
    pub id: &'static str,
    pub name: &'static str,
    pub address: &'static str,
    pub distance: &'static str,
    pub phone: &'static str,
}

pub const DEMO_STORES: &[Store] = &[
    Store {
        id: "1",
        name: "Forum Mall",
        address: "Koramangala, Bangalore",
        distance: "3 km",
        phone: "+91 80 1234 5678",
    },
    Store {
        id: "2",
        name: "Indiranagar",
        address: "100 Feet Road, Indiranagar",
        distance: "7 km",
        phone: "+91 80 1234 5679",
    },
    Store {
        id: "3",
        name: "DLF Promenade",
        address: "Whitefield, Bangalore",
        distance: "10 km",
        phone: "+91 80 1234 5680",
    },
    Store {
        id: "4",
        name: "Saket Mall",
        address: "Bannerghatta Road, Bangalore",
        distance: "15 km",
        phone: "+91 80 1234 5681",
    },
    Store {
        id: "5",
        name: "Select Citywalk",
        address: "MG Road, Bangalore",
        distance: "5 km",
        phone: "+91 80 1234 5682",
    },
];

const MOCK_STOCK: &[u32] = &[2, 5, 0, 1, 3];

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StoreAvailability {
    pub store: Store,
    pub product_id: ProductId,
    pub size: String,
    pub stock: u32,
}

/// Mock availability across the demo stores for one (product, size).
pub fn check_store_inventory(product_id: &ProductId, size: &str) -> Vec<StoreAvailability> {
    DEMO_STORES
        .iter()
        .zip(MOCK_STOCK)
        .map(|(store, stock)| StoreAvailability {
            store: store.clone(),
            product_id: product_id.clone(),
            size: size.to_owned(),
            stock: *stock,
        })
        .collect()
}

pub fn stores_with_stock(product_id: &ProductId, size: &str) -> Vec<StoreAvailability> {
    check_store_inventory(product_id, size)
        .into_iter()
        .filter(|availability| availability.stock > 0)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{check_store_inventory, stores_with_stock, DEMO_STORES};
    use crate::domain::product::ProductId;

    #[test]
    fn every_demo_store_reports_availability() {
        let availability = check_store_inventory(&ProductId("p-1".to_owned()), "M");
        assert_eq!(availability.len(), DEMO_STORES.len());
    }

    #[test]
    fn out_of_stock_stores_are_filtered() {
        let in_stock = stores_with_stock(&ProductId("p-1".to_owned()), "M");
        assert_eq!(in_stock.len(), 4);
        assert!(in_stock.iter().all(|availability| availability.stock > 0));
        assert!(!in_stock.iter().any(|availability| availability.store.name == "DLF Promenade"));
    }
}
