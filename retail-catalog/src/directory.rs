use crate::customer::Customer;

/// Static customer directory backing manual offer selection.
///
/// Stands in for the customer database; ids line up with the join key the
/// notification log uses, but nothing validates that a notification's
/// customer id exists here.
pub struct CustomerDirectory {
    customers: Vec<Customer>,
}

impl CustomerDirectory {
    pub fn new(customers: Vec<Customer>) -> Self {
        Self { customers }
    }

    pub fn all(&self) -> &[Customer] {
        &self.customers
    }

    pub fn find(&self, customer_id: &str) -> Option<&Customer> {
        self.customers.iter().find(|c| c.id == customer_id)
    }

    /// Case-insensitive substring search over name and email.
    pub fn search(&self, query: &str) -> Vec<&Customer> {
        let needle = query.to_lowercase();
        self.customers
            .iter()
            .filter(|c| {
                c.name.to_lowercase().contains(&needle) || c.email.to_lowercase().contains(&needle)
            })
            .collect()
    }
}

impl Default for CustomerDirectory {
    fn default() -> Self {
        Self::new(seed_customers())
    }
}

/// The mock customer database the console ships with.
fn seed_customers() -> Vec<Customer> {
    [
        ("1", "Sarah Johnson", "sarah.johnson@email.com"),
        ("2", "Michael Chen", "michael.chen@email.com"),
        ("3", "Emily Rodriguez", "emily.rodriguez@email.com"),
        ("4", "David Wilson", "david.wilson@email.com"),
        ("5", "Jessica Thompson", "jessica.thompson@email.com"),
        ("6", "Robert Kim", "robert.kim@email.com"),
        ("7", "Lisa Anderson", "lisa.anderson@email.com"),
        ("8", "James Martinez", "james.martinez@email.com"),
        ("9", "Amanda Davis", "amanda.davis@email.com"),
        ("10", "Christopher Lee", "christopher.lee@email.com"),
        ("11", "Jennifer Wilson", "jennifer.wilson@email.com"),
        ("12", "Ryan Garcia", "ryan.garcia@email.com"),
        ("13", "Michelle Brown", "michelle.brown@email.com"),
        ("14", "Kevin Taylor", "kevin.taylor@email.com"),
        ("15", "Ashley Davis", "ashley.davis@email.com"),
    ]
    .iter()
    .map(|(id, name, email)| Customer::basic(id, name, email))
    .collect()
}

/// Demo loyal-customer dataset used when no upload has happened yet.
///
/// The values mirror the sample the console has always shipped; the ranking
/// pipeline computes its own scores and does not treat these as normative.
pub fn demo_loyal_customers() -> Vec<Customer> {
    let rows: [(&str, &str, &str, u8, &str, &str, u32, f64); 10] = [
        (
            "1",
            "Sarah Johnson",
            "sarah.johnson@email.com",
            95,
            "Premium Skincare Set",
            "25% off next purchase + Free shipping",
            45,
            180.50,
        ),
        (
            "2",
            "Michael Chen",
            "michael.chen@email.com",
            92,
            "Smart Watch Pro",
            "Buy 2 Get 1 Free on accessories",
            38,
            220.75,
        ),
        (
            "3",
            "Emily Rodriguez",
            "emily.rodriguez@email.com",
            89,
            "Organic Coffee Beans",
            "Free premium membership upgrade",
            52,
            85.30,
        ),
        (
            "4",
            "David Wilson",
            "david.wilson@email.com",
            87,
            "Fitness Equipment",
            "30% off fitness accessories",
            29,
            340.25,
        ),
        (
            "5",
            "Jessica Thompson",
            "jessica.thompson@email.com",
            85,
            "Designer Handbag",
            "Exclusive early access to new collection",
            33,
            275.80,
        ),
        (
            "6",
            "Robert Kim",
            "robert.kim@email.com",
            83,
            "Gaming Headset",
            "20% off gaming accessories",
            41,
            145.60,
        ),
        (
            "7",
            "Lisa Anderson",
            "lisa.anderson@email.com",
            81,
            "Home Decor Items",
            "Free interior consultation",
            36,
            120.45,
        ),
        (
            "8",
            "James Martinez",
            "james.martinez@email.com",
            79,
            "Gourmet Food Kit",
            "Monthly subscription discount",
            28,
            95.75,
        ),
        (
            "9",
            "Amanda Davis",
            "amanda.davis@email.com",
            77,
            "Yoga Equipment",
            "Free yoga class bundle",
            31,
            75.90,
        ),
        (
            "10",
            "Christopher Lee",
            "christopher.lee@email.com",
            75,
            "Tech Gadgets",
            "Extended warranty package",
            24,
            195.30,
        ),
    ];

    rows.iter()
        .map(
            |(id, name, email, score, product, offer, purchases, avg)| Customer {
                id: id.to_string(),
                name: name.to_string(),
                email: email.to_string(),
                loyalty_score: Some(*score),
                top_purchased_product: Some(product.to_string()),
                recommended_offer: Some(offer.to_string()),
                total_purchases: Some(*purchases),
                average_order_value: Some(*avg),
            },
        )
        .collect()
}
