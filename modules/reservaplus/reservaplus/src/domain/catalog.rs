//! Plan catalog: the built-in fallback and the presentation ordering.

use reservaplus_sdk::PlanSummary;

fn features(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| (*s).to_owned()).collect()
}

/// Built-in catalog served when the store holds no active plans.
#[must_use]
pub fn static_catalog() -> Vec<PlanSummary> {
    vec![
        PlanSummary {
            id: "basico".to_owned(),
            name: "B\u{e1}sico".to_owned(),
            price_monthly: 0,
            price_yearly: 0,
            original_price: None,
            discount_text: None,
            description: "Para profesionales independientes que est\u{e1}n comenzando".to_owned(),
            features: features(&[
                "1 profesional",
                "Hasta 50 reservas al mes",
                "Agenda online",
                "Recordatorios por email",
            ]),
            is_popular: false,
            is_coming_soon: false,
            badge_text: Some("Gratis".to_owned()),
            color_scheme: Some("gray".to_owned()),
            display_order: 1,
        },
        PlanSummary {
            id: "profesional".to_owned(),
            name: "Profesional".to_owned(),
            price_monthly: 50_000,
            price_yearly: 500_000,
            original_price: Some(60_000),
            discount_text: Some("Ahorra 2 meses pagando anual".to_owned()),
            description: "Para centros y equipos que necesitan crecer".to_owned(),
            features: features(&[
                "Hasta 10 profesionales",
                "Reservas ilimitadas",
                "Recordatorios por WhatsApp",
                "Reportes de ocupaci\u{f3}n",
                "Soporte prioritario",
            ]),
            is_popular: true,
            is_coming_soon: false,
            badge_text: Some("M\u{e1}s popular".to_owned()),
            color_scheme: Some("blue".to_owned()),
            display_order: 2,
        },
        PlanSummary {
            id: "empresarial".to_owned(),
            name: "Empresarial".to_owned(),
            price_monthly: 120_000,
            price_yearly: 1_200_000,
            original_price: None,
            discount_text: None,
            description: "Para cadenas con m\u{fa}ltiples sucursales".to_owned(),
            features: features(&[
                "Profesionales ilimitados",
                "M\u{fa}ltiples sucursales",
                "Integraciones a medida",
                "Ejecutivo de cuenta dedicado",
            ]),
            is_popular: false,
            is_coming_soon: true,
            badge_text: Some("Pr\u{f3}ximamente".to_owned()),
            color_scheme: Some("purple".to_owned()),
            display_order: 3,
        },
    ]
}

/// Sort ascending by `display_order`. The sort is stable, so equal orders
/// keep their retrieval order.
pub fn order_for_display(plans: &mut [PlanSummary]) {
    plans.sort_by_key(|plan| plan.display_order);
}
