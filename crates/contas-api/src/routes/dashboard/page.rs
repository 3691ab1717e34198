//! Dashboard rendering
//!
//! `render_dashboard` builds the `#dashboard` fragment from the tracker.
//! A rejected form submission is passed back in as a [`FormState`] so the
//! submitted values and field messages show up where the user typed them.

use chrono::NaiveDate;
use contas_core::chart::{ChartData, CHART_TITLE};
use contas_core::money::format_percent;
use contas_core::{BillForm, Category, FieldErrors, MoneyFormat, Summary, Tip, TipKind, Tracker};
use contas_utils::escape_html;
use rust_decimal::Decimal;
use std::f64::consts::PI;

use crate::routes::bills::render_bill_panel;
use crate::routes::HX_DASHBOARD;

/// Which form a rejected submission came from
#[derive(Debug, Clone, PartialEq)]
pub enum FormTarget {
    New,
    Edit(String),
}

/// Submitted values and their validation messages
#[derive(Debug, Clone)]
pub struct FormState {
    pub target: FormTarget,
    pub form: BillForm,
    pub errors: FieldErrors,
}

impl FormState {
    /// Values to show in the form for `target`, if this state belongs to it
    pub fn for_target(&self, target: &FormTarget) -> Option<&FormState> {
        (self.target == *target).then_some(self)
    }
}

/// The whole dashboard
pub fn render_dashboard(tracker: &Tracker, today: NaiveDate, pending: Option<&FormState>) -> String {
    let summary = tracker.summary();
    let money = tracker.money();

    format!(
        r#"<div id='dashboard' class='space-y-8'>
    {}
    {}
    <div class='grid grid-cols-1 lg:grid-cols-3 gap-8'>
        <div class='lg:col-span-2'>{}</div>
        <div class='space-y-8'>{}{}{}</div>
    </div>
</div>"#,
        balance_card(tracker, &summary),
        summary_cards(&summary, money),
        render_bill_panel(tracker, today, pending),
        chart_card(tracker.chart().as_ref(), money),
        tips_card(&tracker.tips()),
        export_card(&summary, money),
    )
}

// ==================== Balance ====================

fn balance_card(tracker: &Tracker, summary: &Summary) -> String {
    let money = tracker.money();

    let initial = if tracker.ui().editing_balance {
        let value = if summary.initial_balance.is_zero() {
            String::new()
        } else {
            summary.initial_balance.normalize().to_string()
        };
        format!(
            r#"<form class='flex items-center gap-2' hx-post='/balance' {hx}>
                <input type='number' name='balance' step='0.01' min='0' value='{value}' placeholder='0.00' autofocus
                    class='flex-1 px-3 py-2 bg-slate-700 border border-slate-600 rounded-lg text-white'>
                <button type='submit' class='px-3 py-2 bg-green-600 hover:bg-green-700 rounded-lg' title='Salvar'>✓</button>
                <button type='button' hx-post='/balance/cancel' {hx} class='px-3 py-2 bg-slate-600 hover:bg-slate-500 rounded-lg' title='Cancelar'>✗</button>
            </form>"#,
            hx = HX_DASHBOARD,
            value = escape_html(&value),
        )
    } else {
        format!(
            r#"<div class='flex items-center justify-between'>
                <span class='text-2xl font-bold text-white'>{}</span>
                <button hx-post='/balance/edit' {} class='px-3 py-1 text-sm text-slate-300 border border-slate-600 rounded-lg hover:bg-slate-700'>Editar</button>
            </div>"#,
            money.format(summary.initial_balance),
            HX_DASHBOARD,
        )
    };

    let (badge_class, badge, amount_class) = if summary.is_positive {
        ("bg-green-900/50 text-green-300", "Positivo", "text-green-400")
    } else {
        ("bg-red-900/50 text-red-300", "Negativo", "text-red-400")
    };

    let warning = if !summary.is_positive && summary.initial_balance > Decimal::ZERO {
        "<div class='mt-4 p-3 bg-red-900/30 border border-red-700 rounded-lg text-sm text-red-300'>⚠️ Atenção: Suas despesas estão maiores que o saldo disponível!</div>"
    } else {
        ""
    };

    format!(
        r#"<div class='bg-slate-800 border border-slate-700 rounded-xl p-6'>
    <h2 class='text-lg font-semibold text-white mb-4'>Saldo Mensal</h2>
    <div class='grid grid-cols-1 md:grid-cols-2 gap-6'>
        <div>
            <p class='text-sm text-slate-400 mb-2'>Saldo Inicial</p>
            {}
        </div>
        <div>
            <div class='flex items-center gap-2 mb-2'>
                <p class='text-sm text-slate-400'>Saldo Restante</p>
                <span class='px-2 py-0.5 text-xs rounded-full {}'>{}</span>
            </div>
            <span class='text-2xl font-bold {}'>{}</span>
        </div>
    </div>
    {}
</div>"#,
        initial,
        badge_class,
        badge,
        amount_class,
        money.format(summary.remaining_balance),
        warning
    )
}

// ==================== Summary ====================

fn summary_cards(summary: &Summary, money: &MoneyFormat) -> String {
    let totals = &summary.categories;
    let card = |title: &str, value: String, note: String, accent: &str| {
        format!(
            r#"<div class='bg-slate-800 border border-slate-700 rounded-xl p-4'>
        <p class='text-sm text-slate-400'>{}</p>
        <p class='text-xl font-bold {}'>{}</p>
        <p class='text-xs text-slate-500'>{}</p>
    </div>"#,
            title, accent, value, note
        )
    };

    format!(
        "<div class='grid grid-cols-1 md:grid-cols-2 lg:grid-cols-4 gap-4'>{}{}{}{}</div>",
        card(
            "Total Despesas",
            money.format(summary.total_expenses),
            String::new(),
            "text-red-400"
        ),
        card(
            Category::Fixed.plural_label(),
            money.format(totals.fixed_total),
            format!("{} conta(s)", totals.fixed_count),
            "text-blue-400"
        ),
        card(
            Category::Variable.plural_label(),
            money.format(totals.variable_total),
            format!("{} conta(s)", totals.variable_count),
            "text-yellow-400"
        ),
        card(
            "Total Contas",
            summary.bill_count.to_string(),
            "conta(s) cadastrada(s)".to_string(),
            "text-white"
        ),
    )
}

// ==================== Chart ====================

/// Pie and legend; nothing at all while there are no expenses
fn chart_card(chart: Option<&ChartData>, money: &MoneyFormat) -> String {
    let Some(chart) = chart else {
        return String::new();
    };

    let legend: String = chart
        .slices
        .iter()
        .map(|slice| {
            format!(
                r#"<div class='flex items-center justify-between text-sm'>
                <span class='flex items-center gap-2'><span class='w-3 h-3 rounded-full' style='background:{}'></span>{}</span>
                <span class='text-slate-300'>{} ({}%)</span>
            </div>"#,
                slice.color.hex(),
                slice.label,
                money.format(slice.value),
                format_percent(slice.percent)
            )
        })
        .collect();
    let body = format!("{}<div class='mt-4 space-y-2'>{}</div>", pie_svg(chart), legend);

    format!(
        r#"<div id='chart' class='bg-slate-800 border border-slate-700 rounded-xl p-6'>
    <h2 class='text-lg font-semibold text-white mb-4'>{}</h2>
    {}
</div>"#,
        CHART_TITLE, body
    )
}

/// Pie starting at 12 o'clock going clockwise, same geometry as the report snapshot
fn pie_svg(chart: &ChartData) -> String {
    const C: f64 = 100.0;
    const R: f64 = 80.0;

    let slices: Vec<_> = chart.visible_slices().collect();
    let mut shapes = String::new();

    if let [only] = slices.as_slice() {
        shapes.push_str(&format!(
            "<circle cx='{C}' cy='{C}' r='{R}' fill='{}'/>",
            only.color.hex()
        ));
    } else {
        let point = |angle: f64| (C + R * angle.sin(), C - R * angle.cos());
        let mut start = 0.0;
        for slice in slices {
            let end = start + slice.fraction(chart.total) * 2.0 * PI;
            let (x0, y0) = point(start);
            let (x1, y1) = point(end);
            let large = if end - start > PI { 1 } else { 0 };
            shapes.push_str(&format!(
                "<path d='M{C},{C} L{x0:.2},{y0:.2} A{R},{R} 0 {large} 1 {x1:.2},{y1:.2} Z' fill='{}'/>",
                slice.color.hex()
            ));
            start = end;
        }
    }

    format!(
        "<svg viewBox='0 0 200 200' class='w-48 h-48 mx-auto' role='img' aria-label='{}'>{}</svg>",
        CHART_TITLE, shapes
    )
}

// ==================== Tips ====================

fn tips_card(tips: &[Tip]) -> String {
    let items: String = tips
        .iter()
        .map(|tip| {
            let icon = match tip.kind {
                TipKind::Warning => "⚠️",
                TipKind::Success => "💰",
                TipKind::Info => "✅",
                TipKind::Tip => "💡",
            };
            format!(
                r#"<div class='p-4 bg-slate-700/50 rounded-lg border-l-4' style='border-color:{accent}'>
            <div class='flex items-center gap-2 mb-1'>
                <span>{icon}</span>
                <h3 class='font-medium text-white'>{title}</h3>
                <span class='ml-auto px-2 py-0.5 text-xs rounded-full bg-slate-600' style='color:{accent}'>{badge}</span>
            </div>
            <p class='text-sm text-slate-300'>{message}</p>
        </div>"#,
                accent = tip.accent,
                icon = icon,
                title = escape_html(&tip.title),
                badge = tip.kind.badge(),
                message = escape_html(&tip.message),
            )
        })
        .collect();

    format!(
        r#"<div id='tips' class='bg-slate-800 border border-slate-700 rounded-xl p-6'>
    <h2 class='text-lg font-semibold text-white mb-4'>Dicas Financeiras</h2>
    <div class='space-y-3'>{}</div>
</div>"#,
        items
    )
}

// ==================== Export ====================

fn export_card(summary: &Summary, money: &MoneyFormat) -> String {
    if !summary.export_enabled() {
        return String::new();
    }
    format!(
        r#"<div id='export' class='bg-slate-800 border border-slate-700 rounded-xl p-6'>
    <h2 class='text-lg font-semibold text-white mb-1'>Exportar Relatório</h2>
    <p class='text-sm text-slate-400 mb-4'>Gere um PDF completo com todas as informações financeiras</p>
    <div class='flex items-center justify-between text-sm text-slate-300 mb-4'>
        <span>{} conta(s) • {}</span>
        <span class='px-2 py-0.5 text-xs rounded-full bg-slate-700'>Saldo: {}</span>
    </div>
    <a href='/export' download class='block w-full text-center px-4 py-2 bg-blue-600 hover:bg-blue-700 rounded-lg text-white font-medium'>Exportar PDF</a>
</div>"#,
        summary.bill_count,
        money.format(summary.total_expenses),
        money.format(summary.remaining_balance)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use contas_core::{BillDraft, TrackerSettings};
    use contas_store::Store;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 10).unwrap()
    }

    fn tracker() -> Tracker {
        Tracker::open(Store::in_memory(), TrackerSettings::default())
    }

    fn draft(name: &str, amount: i64, category: Category) -> BillDraft {
        BillDraft {
            name: name.to_string(),
            amount: Decimal::from(amount),
            due_date: NaiveDate::from_ymd_opt(2024, 5, 12).unwrap(),
            category,
            note: None,
        }
    }

    #[test]
    fn test_empty_dashboard() {
        let html = render_dashboard(&tracker(), today(), None);
        assert!(html.starts_with("<div id='dashboard'"));
        assert!(html.contains("Nenhuma conta cadastrada"));
        // no expenses, no chart card
        assert!(!html.contains("id='chart'"));
        // zero balance opens the balance input
        assert!(html.contains("name='balance'"));
        assert!(!html.contains("Exportar PDF"));
    }

    #[test]
    fn test_negative_balance_warning() {
        let mut t = tracker();
        t.set_balance(Decimal::from(100));
        t.add_bill(draft("Aluguel", 150, Category::Fixed));
        let html = render_dashboard(&t, today(), None);
        assert!(html.contains("Negativo"));
        assert!(html.contains("Suas despesas estão maiores que o saldo disponível"));
        assert!(html.contains("R$ -50.00"));
        assert!(html.contains("Exportar PDF"));
    }

    #[test]
    fn test_no_warning_without_balance() {
        let mut t = tracker();
        t.add_bill(draft("Aluguel", 150, Category::Fixed));
        let html = render_dashboard(&t, today(), None);
        assert!(html.contains("Negativo"));
        assert!(!html.contains("Suas despesas estão maiores"));
    }

    #[test]
    fn test_summary_cards_counts() {
        let mut t = tracker();
        t.add_bill(draft("Luz", 100, Category::Fixed));
        t.add_bill(draft("Mercado", 300, Category::Variable));
        t.add_bill(draft("Mercado 2", 100, Category::Variable));
        let html = summary_cards(&t.summary(), t.money());
        assert!(html.contains("R$ 500.00"));
        assert!(html.contains("1 conta(s)"));
        assert!(html.contains("2 conta(s)"));
    }

    #[test]
    fn test_chart_legend() {
        let mut t = tracker();
        t.add_bill(draft("Luz", 100, Category::Fixed));
        t.add_bill(draft("Mercado", 300, Category::Variable));
        let html = chart_card(t.chart().as_ref(), t.money());
        assert!(html.contains("Contas Fixas"));
        assert!(html.contains("R$ 100.00 (25.0%)"));
        assert!(html.contains("R$ 300.00 (75.0%)"));
        assert_eq!(html.matches("<path").count(), 2);
    }

    #[test]
    fn test_single_slice_is_full_circle() {
        let mut t = tracker();
        t.add_bill(draft("Mercado", 300, Category::Variable));
        let svg = pie_svg(&t.chart().unwrap());
        assert!(svg.contains("<circle"));
        assert!(svg.contains("#f59e0b"));
        assert!(!svg.contains("<path"));
    }

    #[test]
    fn test_form_state_target() {
        let state = FormState {
            target: FormTarget::Edit("1".to_string()),
            form: BillForm::default(),
            errors: FieldErrors::new(),
        };
        assert!(state.for_target(&FormTarget::Edit("1".to_string())).is_some());
        assert!(state.for_target(&FormTarget::New).is_none());
    }
}
