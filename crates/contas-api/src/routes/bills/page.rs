//! Bill panel rendering: the add form, the list and its rows

use chrono::NaiveDate;
use contas_core::{BillEntry, BillForm, Category, FieldErrors, MoneyFormat, Tracker};
use contas_utils::escape_html;

use crate::routes::dashboard::{FormState, FormTarget};
use crate::routes::HX_DASHBOARD;

/// "Minhas Contas": toggle, optional add form, then the rows sorted by due date
pub fn render_bill_panel(tracker: &Tracker, today: NaiveDate, pending: Option<&FormState>) -> String {
    let ui = tracker.ui();

    let toggle_label = if ui.form_visible { "Cancelar" } else { "Adicionar Conta" };
    let new_form = if ui.form_visible {
        let state = pending.and_then(|p| p.for_target(&FormTarget::New));
        let empty = FieldErrors::new();
        render_bill_form(
            "/bills",
            &state.map(|s| s.form.clone()).unwrap_or_default(),
            state.map(|s| &s.errors).unwrap_or(&empty),
            "Adicionar Conta",
            None,
        )
    } else {
        String::new()
    };

    let entries = tracker.entries(today);
    let list = if entries.is_empty() {
        r#"<div class='text-center py-12'>
            <p class='text-lg text-slate-300 mb-1'>Nenhuma conta cadastrada</p>
            <p class='text-sm text-slate-500'>Adicione suas primeiras contas para começar o controle financeiro</p>
        </div>"#
            .to_string()
    } else {
        let rows: String = entries
            .iter()
            .map(|entry| {
                if ui.editing_id.as_deref() == Some(entry.bill.id.as_str()) {
                    edit_row(entry, pending)
                } else {
                    bill_row(entry, tracker.money())
                }
            })
            .collect();
        format!("<ul class='space-y-3'>{}</ul>", rows)
    };

    format!(
        r#"<div id='bills' class='bg-slate-800 border border-slate-700 rounded-xl p-6'>
    <div class='flex items-center justify-between mb-4'>
        <h2 class='text-lg font-semibold text-white'>Minhas Contas</h2>
        <button hx-post='/bills/form/toggle' {} class='px-4 py-2 bg-blue-600 hover:bg-blue-700 rounded-lg text-sm font-medium text-white'>{}</button>
    </div>
    {}
    {}
</div>"#,
        HX_DASHBOARD, toggle_label, new_form, list
    )
}

/// Bill form; `cancel_action` adds a cancel button posting there
pub fn render_bill_form(
    action: &str,
    form: &BillForm,
    errors: &FieldErrors,
    submit_label: &str,
    cancel_action: Option<&str>,
) -> String {
    let field_error = |field: &str| match errors.get(field) {
        Some(message) => format!("<p class='mt-1 text-xs text-red-400'>{}</p>", escape_html(message)),
        None => String::new(),
    };
    let border = |field: &str| {
        if errors.get(field).is_some() {
            "border-red-500"
        } else {
            "border-slate-600"
        }
    };

    let selected = form.category();
    let options: String = Category::ALL
        .iter()
        .map(|c| {
            format!(
                "<option value='{}'{}>{}</option>",
                c,
                if *c == selected { " selected" } else { "" },
                c.label()
            )
        })
        .collect();

    let cancel = cancel_action
        .map(|url| {
            format!(
                "<button type='button' hx-post='{}' {} class='px-4 py-2 bg-slate-600 hover:bg-slate-500 rounded-lg text-white'>Cancelar</button>",
                url, HX_DASHBOARD
            )
        })
        .unwrap_or_default();

    let input = "w-full px-3 py-2 bg-slate-700 border rounded-lg text-white placeholder-slate-400";

    format!(
        r#"<form hx-post='{action}' {hx} class='mb-6 p-4 bg-slate-700/40 border border-slate-600 rounded-lg space-y-4'>
    <div class='grid grid-cols-1 md:grid-cols-2 gap-4'>
        <div>
            <label class='block text-sm text-slate-300 mb-1'>Nome da Conta *</label>
            <input type='text' name='name' value='{name}' placeholder='Ex: Energia elétrica' class='{input} {name_border}'>
            {name_error}
        </div>
        <div>
            <label class='block text-sm text-slate-300 mb-1'>Valor (R$) *</label>
            <input type='number' name='amount' step='0.01' min='0' value='{amount}' placeholder='0.00' class='{input} {amount_border}'>
            {amount_error}
        </div>
        <div>
            <label class='block text-sm text-slate-300 mb-1'>Vencimento *</label>
            <input type='date' name='due_date' value='{due_date}' class='{input} {due_border}'>
            {due_error}
        </div>
        <div>
            <label class='block text-sm text-slate-300 mb-1'>Tipo</label>
            <select name='category' class='{input} border-slate-600'>{options}</select>
        </div>
    </div>
    <div>
        <label class='block text-sm text-slate-300 mb-1'>Observação (opcional)</label>
        <textarea name='note' rows='2' placeholder='Detalhes adicionais sobre esta conta...' class='{input} border-slate-600'>{note}</textarea>
    </div>
    <div class='flex gap-2'>
        <button type='submit' class='flex-1 px-4 py-2 bg-green-600 hover:bg-green-700 rounded-lg text-white font-medium'>{submit}</button>
        {cancel}
    </div>
</form>"#,
        action = action,
        hx = HX_DASHBOARD,
        input = input,
        name = escape_html(&form.name),
        name_border = border("name"),
        name_error = field_error("name"),
        amount = escape_html(&form.amount),
        amount_border = border("amount"),
        amount_error = field_error("amount"),
        due_date = escape_html(&form.due_date),
        due_border = border("due_date"),
        due_error = field_error("due_date"),
        options = options,
        note = escape_html(&form.note),
        submit = submit_label,
        cancel = cancel,
    )
}

fn edit_row(entry: &BillEntry, pending: Option<&FormState>) -> String {
    let id = &entry.bill.id;
    let target = FormTarget::Edit(id.clone());
    let (form, errors) = match pending.and_then(|p| p.for_target(&target)) {
        Some(state) => (state.form.clone(), state.errors.clone()),
        None => (BillForm::from_bill(&entry.bill), FieldErrors::new()),
    };
    let action = format!("/bills/{}", urlencoding::encode(id));
    let cancel = format!("/bills/{}/cancel", urlencoding::encode(id));
    format!(
        "<li id='bill-{}'>{}</li>",
        escape_html(id),
        render_bill_form(&action, &form, &errors, "Salvar Alterações", Some(&cancel))
    )
}

fn bill_row(entry: &BillEntry, money: &MoneyFormat) -> String {
    let bill = &entry.bill;
    let id = urlencoding::encode(&bill.id);

    let category_badge = match bill.category {
        Category::Fixed => "bg-blue-900/50 text-blue-300",
        Category::Variable => "bg-yellow-900/50 text-yellow-300",
    };
    let due_badge = if entry.due_soon {
        "<span class='px-2 py-0.5 text-xs rounded-full bg-orange-900/50 text-orange-300'>Vence em breve</span>"
    } else {
        ""
    };
    let note = bill
        .note
        .as_deref()
        .map(|n| format!("<p class='mt-1 text-sm text-slate-400'>{}</p>", escape_html(n)))
        .unwrap_or_default();

    format!(
        r#"<li id='bill-{dom_id}' class='p-4 bg-slate-700/40 border border-slate-600 rounded-lg'>
    <div class='flex items-start justify-between gap-4'>
        <div class='flex-1'>
            <div class='flex items-center gap-2 flex-wrap'>
                <h3 class='font-medium text-white'>{name}</h3>
                <span class='px-2 py-0.5 text-xs rounded-full {category_badge}'>{category}</span>
                {due_badge}
            </div>
            <div class='flex items-center gap-4 mt-1 text-sm'>
                <span class='font-semibold text-green-400'>{amount}</span>
                <span class='text-slate-400'>{due_date}</span>
            </div>
            {note}
        </div>
        <div class='flex gap-2'>
            <button hx-post='/bills/{id}/edit' {hx} class='px-3 py-1 text-sm text-slate-300 border border-slate-600 rounded-lg hover:bg-slate-600'>Editar</button>
            <button hx-post='/bills/{id}/delete' {hx} class='px-3 py-1 text-sm text-red-400 border border-red-800 rounded-lg hover:bg-red-900/40'>Excluir</button>
        </div>
    </div>
</li>"#,
        dom_id = escape_html(&bill.id),
        name = escape_html(&bill.name),
        category_badge = category_badge,
        category = bill.category.label(),
        due_badge = due_badge,
        amount = money.format(bill.amount),
        due_date = bill.due_date_display(),
        note = note,
        id = id,
        hx = HX_DASHBOARD,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use contas_core::{Bill, BillDraft};
    use rust_decimal::Decimal;

    fn entry(due_soon: bool, note: Option<&str>) -> BillEntry {
        BillEntry {
            bill: Bill::from_draft(
                "17".to_string(),
                BillDraft {
                    name: "<b>Luz</b>".to_string(),
                    amount: Decimal::new(15050, 2),
                    due_date: NaiveDate::from_ymd_opt(2024, 5, 12).unwrap(),
                    category: Category::Variable,
                    note: note.map(str::to_string),
                },
            ),
            days_until: 2,
            due_soon,
        }
    }

    #[test]
    fn test_bill_row_escapes_and_formats() {
        let html = bill_row(&entry(true, Some("pagar & guardar")), &MoneyFormat::default());
        assert!(html.contains("&lt;b&gt;Luz&lt;/b&gt;"));
        assert!(!html.contains("<b>Luz"));
        assert!(html.contains("R$ 150.50"));
        assert!(html.contains("12/05/2024"));
        assert!(html.contains("Variável"));
        assert!(html.contains("Vence em breve"));
        assert!(html.contains("pagar &amp; guardar"));
        assert!(html.contains("hx-post='/bills/17/edit'"));
        assert!(html.contains("hx-post='/bills/17/delete'"));
    }

    #[test]
    fn test_bill_row_not_due_soon() {
        let html = bill_row(&entry(false, None), &MoneyFormat::default());
        assert!(!html.contains("Vence em breve"));
    }

    #[test]
    fn test_form_shows_errors_and_values() {
        let form = BillForm {
            name: String::new(),
            amount: "-5".to_string(),
            due_date: String::new(),
            category: "variable".to_string(),
            note: "x".to_string(),
        };
        let mut errors = FieldErrors::new();
        errors.insert("name", "Nome da conta é obrigatório");
        errors.insert("amount", "Valor deve ser um número positivo");

        let html = render_bill_form("/bills", &form, &errors, "Adicionar Conta", None);
        assert!(html.contains("Nome da conta é obrigatório"));
        assert!(html.contains("Valor deve ser um número positivo"));
        assert!(html.contains("value='-5'"));
        assert!(html.contains("<option value='variable' selected>Variável</option>"));
        assert!(!html.contains("Cancelar"));
    }

    #[test]
    fn test_edit_row_prefills_from_bill() {
        let html = edit_row(&entry(false, Some("obs")), None);
        assert!(html.contains("hx-post='/bills/17'"));
        assert!(html.contains("value='150.5'"));
        assert!(html.contains("value='2024-05-12'"));
        assert!(html.contains("Salvar Alterações"));
        assert!(html.contains("hx-post='/bills/17/cancel'"));
    }
}
