//! Report layout
//!
//! Turns the tracker figures into positioned text on A4 pages. Nothing
//! here touches PDF primitives; coordinates are millimetres measured from
//! the top-left corner and `y` is the text baseline.

use chrono::NaiveDate;
use contas_core::models::DISPLAY_DATE_FORMAT;
use contas_core::{schedule, Bill, Category, MoneyFormat, Summary, Tracker};

use crate::snapshot::Snapshot;

pub const PAGE_WIDTH: f32 = 210.0;
pub const PAGE_HEIGHT: f32 = 297.0;
pub const MARGIN: f32 = 20.0;

/// The bill listing starts a new page before an entry below this line
pub const BILLS_BREAK_AT: f32 = 250.0;
/// The tips section starts a new page before a line below this one
pub const TIPS_BREAK_AT: f32 = 270.0;

pub const REPORT_TITLE: &str = "RELATÓRIO FINANCEIRO PESSOAL";

const BASE_TIPS: [&str; 5] = [
    "Regra 50-30-20: 50% necessidades, 30% desejos, 20% poupança",
    "Mantenha uma reserva de emergência de 6 meses de gastos",
    "Revise suas contas mensalmente para identificar gastos desnecessários",
    "Considere renegociar contratos de serviços (internet, telefone, etc.)",
    "Automatize suas economias para não esquecer de poupar",
];

const URGENT_TIPS: [&str; 3] = [
    "Considere aumentar a renda ou reduzir despesas",
    "Revise urgentemente todos os gastos",
    "ATENÇÃO: Suas despesas excedem o saldo disponível!",
];

/// Tip lines printed on the tips page
pub fn report_tips(negative_balance: bool) -> Vec<&'static str> {
    let mut tips = Vec::with_capacity(BASE_TIPS.len() + URGENT_TIPS.len());
    if negative_balance {
        tips.extend(URGENT_TIPS);
    }
    tips.extend(BASE_TIPS);
    tips
}

// ==================== Document Model ====================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontWeight {
    Regular,
    Bold,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextLine {
    pub text: String,
    pub x: f32,
    pub y: f32,
    pub size: f32,
    pub weight: FontWeight,
}

/// A raster placed on a page, `y` is its top edge
#[derive(Debug, Clone, PartialEq)]
pub struct ImageBlock {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub snapshot: Snapshot,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReportPage {
    pub lines: Vec<TextLine>,
    pub image: Option<ImageBlock>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReportDocument {
    pub title: String,
    pub pages: Vec<ReportPage>,
}

impl ReportDocument {
    /// Every line of text, page by page
    pub fn lines(&self) -> impl Iterator<Item = &TextLine> {
        self.pages.iter().flat_map(|p| p.lines.iter())
    }

    /// Index of the first page containing `text`
    pub fn page_of(&self, text: &str) -> Option<usize> {
        self.pages
            .iter()
            .position(|p| p.lines.iter().any(|l| l.text == text))
    }
}

// ==================== Input ====================

/// Everything the report prints
#[derive(Debug, Clone)]
pub struct ReportInput {
    pub generated_on: NaiveDate,
    pub author: String,
    pub summary: Summary,
    pub bills: Vec<Bill>,
    pub money: MoneyFormat,
}

impl ReportInput {
    pub fn from_tracker(tracker: &Tracker, generated_on: NaiveDate, author: &str) -> Self {
        Self {
            generated_on,
            author: author.to_string(),
            summary: tracker.summary(),
            bills: tracker.bills().to_vec(),
            money: tracker.money().clone(),
        }
    }

    /// `relatorio-financeiro-YYYY-MM-DD.pdf`
    pub fn file_name(&self) -> String {
        format!("relatorio-financeiro-{}.pdf", self.generated_on.format("%Y-%m-%d"))
    }
}

// ==================== Builder ====================

pub struct ReportBuilder<'a> {
    input: &'a ReportInput,
    pages: Vec<ReportPage>,
    y: f32,
}

impl<'a> ReportBuilder<'a> {
    pub fn new(input: &'a ReportInput) -> Self {
        Self {
            input,
            pages: vec![ReportPage::default()],
            y: MARGIN,
        }
    }

    /// Lay out every section; `chart` adds a final page with the snapshot
    pub fn build(mut self, chart: Option<Snapshot>) -> ReportDocument {
        self.header();
        self.summary();
        self.categories();
        self.bill_listing();
        self.tips();
        if let Some(snapshot) = chart {
            self.chart_page(snapshot);
        }

        ReportDocument {
            title: REPORT_TITLE.to_string(),
            pages: self.pages,
        }
    }

    fn header(&mut self) {
        self.text(REPORT_TITLE, MARGIN, 20.0, FontWeight::Bold);
        let generated = format!(
            "Gerado em: {}",
            self.input.generated_on.format(DISPLAY_DATE_FORMAT)
        );
        self.text(&generated, MARGIN, 10.0, FontWeight::Regular);
        let author = format!("Criado por: {}", self.input.author);
        self.text(&author, MARGIN, 10.0, FontWeight::Regular);
        self.y += 10.0;
    }

    fn summary(&mut self) {
        let summary = &self.input.summary;
        let money = &self.input.money;

        self.section("RESUMO FINANCEIRO");
        let lines = [
            format!("Saldo Inicial: {}", money.format(summary.initial_balance)),
            format!("Total de Despesas: {}", money.format(summary.total_expenses)),
        ];
        for line in &lines {
            self.text(line, MARGIN, 12.0, FontWeight::Regular);
        }
        let remaining = format!(
            "Saldo Restante: {} {}",
            money.format(summary.remaining_balance),
            if summary.is_positive { "(POSITIVO)" } else { "(NEGATIVO)" }
        );
        self.text(&remaining, MARGIN, 12.0, FontWeight::Bold);
        self.y += 10.0;
    }

    fn categories(&mut self) {
        self.section("ANÁLISE POR TIPO DE CONTA");
        for category in Category::ALL {
            let line = format!(
                "{}: {} ({} contas)",
                category.plural_label(),
                self.input.money.format(self.input.summary.categories.total(category)),
                self.input.summary.categories.count(category)
            );
            self.text(&line, MARGIN, 12.0, FontWeight::Regular);
        }
        self.y += 10.0;
    }

    fn bill_listing(&mut self) {
        if self.input.bills.is_empty() {
            return;
        }
        self.section("DETALHAMENTO DAS CONTAS");

        let indent = MARGIN + 5.0;
        for (index, bill) in schedule::sorted_by_due_date(&self.input.bills).iter().enumerate() {
            if self.y > BILLS_BREAK_AT {
                self.new_page();
            }
            self.text(&format!("{}. {}", index + 1, bill.name), MARGIN, 12.0, FontWeight::Bold);
            let valor = format!("   Valor: {}", self.input.money.format(bill.amount));
            self.text(&valor, indent, 10.0, FontWeight::Regular);
            let vencimento = format!("   Vencimento: {}", bill.due_date_display());
            self.text(&vencimento, indent, 10.0, FontWeight::Regular);
            let tipo = format!("   Tipo: {}", bill.category.label());
            self.text(&tipo, indent, 10.0, FontWeight::Regular);
            if let Some(note) = &bill.note {
                self.text(&format!("   Observação: {}", note), indent, 10.0, FontWeight::Regular);
            }
            self.y += 3.0;
        }
    }

    fn tips(&mut self) {
        self.new_page();
        self.section("DICAS FINANCEIRAS");
        for tip in report_tips(!self.input.summary.is_positive) {
            if self.y > TIPS_BREAK_AT {
                self.new_page();
            }
            self.text(&format!("• {}", tip), MARGIN, 10.0, FontWeight::Regular);
        }
    }

    fn chart_page(&mut self, snapshot: Snapshot) {
        self.new_page();
        self.text("GRÁFICO DE DESPESAS", MARGIN, 16.0, FontWeight::Bold);

        let width = PAGE_WIDTH - MARGIN * 2.0;
        let height = if snapshot.width == 0 {
            0.0
        } else {
            snapshot.height as f32 * width / snapshot.width as f32
        };
        let block = ImageBlock {
            x: MARGIN,
            y: self.y + 10.0,
            width,
            height,
            snapshot,
        };
        self.current().image = Some(block);
    }

    fn section(&mut self, title: &str) {
        self.text(title, MARGIN, 16.0, FontWeight::Bold);
        self.y += 5.0;
    }

    /// Write one line at the cursor and advance it
    fn text(&mut self, text: &str, x: f32, size: f32, weight: FontWeight) {
        let y = self.y;
        self.current().lines.push(TextLine {
            text: text.to_string(),
            x,
            y,
            size,
            weight,
        });
        self.y = y + size * 0.5 + 2.0;
    }

    fn new_page(&mut self) {
        self.pages.push(ReportPage::default());
        self.y = MARGIN;
    }

    fn current(&mut self) -> &mut ReportPage {
        if self.pages.is_empty() {
            self.pages.push(ReportPage::default());
        }
        let last = self.pages.len() - 1;
        &mut self.pages[last]
    }
}
