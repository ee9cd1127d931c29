//! PT/EN string tables for user-facing output.
//!
//! The original string tables lived in ad-hoc dictionaries with a runtime
//! English fallback; here both tables are exhaustive matches, so a missing
//! key cannot compile.

use clap::ValueEnum;

use crate::score::Verdict;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Lang {
    Pt,
    En,
}

/// Every user-facing message key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Msg {
    AppTitle,
    StartingTest,
    Running,
    Done,
    Interrupted,
    NoRtt,
    Summary,
    Host,
    Sent,
    Loss,
    Mean,
    P95,
    Min,
    Max,
    Jitter,
    OverallScore,
    VerdictLabel,
    VerdictStable,
    VerdictMinorOscillation,
    VerdictUnstable,
    VerdictExcellent,
    VerdictGood,
    VerdictFair,
    VerdictPoor,
    VerdictVeryPoor,
    Suitability,
    Streaming,
    VideoCall,
    Gaming,
    Suitable,
    NotRecommended,
    ReportTitle,
    ReportReady,
    HistorySaved,
    Method,
    MethodText,
    StabilityText,
    ChartComparative,
    ChartComparativeCaption,
    ChartBars,
    ChartBarsCaption,
    HistoryTitle,
    HistoryCaption,
    HistoryEmpty,
    InterpretTitle,
    InterpretLoss,
    InterpretLatency,
    InterpretJitter,
    TimeAxis,
    GeneratedAt,
    Footnote,
}

/// Used by the coverage test; keep in sync with [`Msg`].
pub const ALL_MESSAGES: &[Msg] = &[
    Msg::AppTitle,
    Msg::StartingTest,
    Msg::Running,
    Msg::Done,
    Msg::Interrupted,
    Msg::NoRtt,
    Msg::Summary,
    Msg::Host,
    Msg::Sent,
    Msg::Loss,
    Msg::Mean,
    Msg::P95,
    Msg::Min,
    Msg::Max,
    Msg::Jitter,
    Msg::OverallScore,
    Msg::VerdictLabel,
    Msg::VerdictStable,
    Msg::VerdictMinorOscillation,
    Msg::VerdictUnstable,
    Msg::VerdictExcellent,
    Msg::VerdictGood,
    Msg::VerdictFair,
    Msg::VerdictPoor,
    Msg::VerdictVeryPoor,
    Msg::Suitability,
    Msg::Streaming,
    Msg::VideoCall,
    Msg::Gaming,
    Msg::Suitable,
    Msg::NotRecommended,
    Msg::ReportTitle,
    Msg::ReportReady,
    Msg::HistorySaved,
    Msg::Method,
    Msg::MethodText,
    Msg::StabilityText,
    Msg::ChartComparative,
    Msg::ChartComparativeCaption,
    Msg::ChartBars,
    Msg::ChartBarsCaption,
    Msg::HistoryTitle,
    Msg::HistoryCaption,
    Msg::HistoryEmpty,
    Msg::InterpretTitle,
    Msg::InterpretLoss,
    Msg::InterpretLatency,
    Msg::InterpretJitter,
    Msg::TimeAxis,
    Msg::GeneratedAt,
    Msg::Footnote,
];

impl Lang {
    pub fn text(self, msg: Msg) -> &'static str {
        match self {
            Lang::Pt => pt(msg),
            Lang::En => en(msg),
        }
    }
}

/// Message key for a verdict variant.
pub fn verdict_msg(verdict: Verdict) -> Msg {
    match verdict {
        Verdict::Stable => Msg::VerdictStable,
        Verdict::MinorOscillation => Msg::VerdictMinorOscillation,
        Verdict::Unstable => Msg::VerdictUnstable,
        Verdict::Excellent => Msg::VerdictExcellent,
        Verdict::Good => Msg::VerdictGood,
        Verdict::Fair => Msg::VerdictFair,
        Verdict::Poor => Msg::VerdictPoor,
        Verdict::VeryPoor => Msg::VerdictVeryPoor,
    }
}

fn pt(msg: Msg) -> &'static str {
    match msg {
        Msg::AppTitle => "Analisador de Latência e Estabilidade de Rede",
        Msg::StartingTest => "Executando por {duration} em {hosts} servidores...",
        Msg::Running => "Executando...",
        Msg::Done => "Teste concluído.",
        Msg::Interrupted => "Teste interrompido — usando as amostras coletadas até aqui.",
        Msg::NoRtt => "Nenhum RTT coletado. Verifique a conectividade ou permissões.",
        Msg::Summary => "Resumo",
        Msg::Host => "Servidor",
        Msg::Sent => "Enviados",
        Msg::Loss => "Perda (%)",
        Msg::Mean => "Média (ms)",
        Msg::P95 => "p95 (ms)",
        Msg::Min => "Mín",
        Msg::Max => "Máx",
        Msg::Jitter => "Jitter (ms)",
        Msg::OverallScore => "Nota geral",
        Msg::VerdictLabel => "Diagnóstico",
        Msg::VerdictStable => "Conexão excelente e estável",
        Msg::VerdictMinorOscillation => "Rede ok, mas com leves oscilações",
        Msg::VerdictUnstable => "Rede instável (latência/jitter/perda elevados)",
        Msg::VerdictExcellent => "Excelente",
        Msg::VerdictGood => "Boa",
        Msg::VerdictFair => "Regular",
        Msg::VerdictPoor => "Ruim",
        Msg::VerdictVeryPoor => "Muito Ruim",
        Msg::Suitability => "Adequação por uso",
        Msg::Streaming => "Streaming",
        Msg::VideoCall => "Videoconferência",
        Msg::Gaming => "Jogos online",
        Msg::Suitable => "Adequada",
        Msg::NotRecommended => "Não recomendada",
        Msg::ReportTitle => "Relatório de Latência e Estabilidade",
        Msg::ReportReady => "Relatório gerado: {path}",
        Msg::HistorySaved => "Histórico atualizado: {path}",
        Msg::Method => "Metodologia",
        Msg::MethodText => {
            "Coletamos tempos de ida e volta (RTT) usando o utilitário do sistema `ping`. \
             Calculamos média, mínimo, máximo, p95 e jitter, além da perda de pacotes. \
             A pontuação de estabilidade combina essas métricas."
        }
        Msg::StabilityText => {
            "Quanto maior a pontuação, melhor. Valores no topo da escala indicam rede \
             estável para a maioria das aplicações."
        }
        Msg::ChartComparative => "Comparativo de Latência (ms)",
        Msg::ChartComparativeCaption => {
            "Cada linha mostra a latência por destino ao longo do tempo. Linhas baixas e \
             suaves indicam estabilidade; picos sugerem variação momentânea ou congestionamento."
        }
        Msg::ChartBars => "Desempenho por Destino (Ping / Jitter / Perda)",
        Msg::ChartBarsCaption => {
            "Barras menores são melhores. Ping afeta o tempo de resposta; jitter alto causa \
             cortes em voz/vídeo; perda acima de 1% tende a gerar travamentos perceptíveis."
        }
        Msg::HistoryTitle => "Painel Histórico",
        Msg::HistoryCaption => {
            "Evolução da rede ao longo das execuções. Tendências ascendentes de \
             ping/jitter/perda indicam piora; a nota resume o conjunto das métricas."
        }
        Msg::HistoryEmpty => {
            "Histórico ainda não disponível — execute novos testes para construir comparativos."
        }
        Msg::InterpretTitle => "Como interpretar",
        Msg::InterpretLoss => "Perda (%): quanto menor, melhor. Acima de 1% já causa travadinhas.",
        Msg::InterpretLatency => {
            "Média e p95: latência típica e limite para 95% das medições (quanto menores, melhor)."
        }
        Msg::InterpretJitter => {
            "Jitter: variação entre pings (quanto menor, mais estável). Valores altos \
             prejudicam voz/vídeo."
        }
        Msg::TimeAxis => "Tempo (s)",
        Msg::GeneratedAt => "Data/Hora",
        Msg::Footnote => "© {year} Relatório gerado automaticamente.",
    }
}

fn en(msg: Msg) -> &'static str {
    match msg {
        Msg::AppTitle => "Network Latency & Stability Analyzer",
        Msg::StartingTest => "Running for {duration} against {hosts} hosts...",
        Msg::Running => "Running...",
        Msg::Done => "Test complete.",
        Msg::Interrupted => "Test interrupted — using the samples collected so far.",
        Msg::NoRtt => "No RTT collected. Check connectivity or permissions.",
        Msg::Summary => "Summary",
        Msg::Host => "Host",
        Msg::Sent => "Sent",
        Msg::Loss => "Loss (%)",
        Msg::Mean => "Mean (ms)",
        Msg::P95 => "p95 (ms)",
        Msg::Min => "Min",
        Msg::Max => "Max",
        Msg::Jitter => "Jitter (ms)",
        Msg::OverallScore => "Overall score",
        Msg::VerdictLabel => "Verdict",
        Msg::VerdictStable => "Excellent, stable connection",
        Msg::VerdictMinorOscillation => "Network ok, with minor oscillation",
        Msg::VerdictUnstable => "Unstable network (high latency/jitter/loss)",
        Msg::VerdictExcellent => "Excellent",
        Msg::VerdictGood => "Good",
        Msg::VerdictFair => "Fair",
        Msg::VerdictPoor => "Poor",
        Msg::VerdictVeryPoor => "Very Poor",
        Msg::Suitability => "Suitability by use case",
        Msg::Streaming => "Streaming",
        Msg::VideoCall => "Video call",
        Msg::Gaming => "Online gaming",
        Msg::Suitable => "Suitable",
        Msg::NotRecommended => "Not recommended",
        Msg::ReportTitle => "Latency & Stability Report",
        Msg::ReportReady => "Report generated: {path}",
        Msg::HistorySaved => "History updated: {path}",
        Msg::Method => "Methodology",
        Msg::MethodText => {
            "We collect round-trip times (RTT) with the system `ping` utility and compute \
             mean, min, max, p95, jitter and packet loss. The stability score combines \
             these metrics."
        }
        Msg::StabilityText => {
            "Higher scores are better. Values near the top of the scale indicate a network \
             stable enough for most applications."
        }
        Msg::ChartComparative => "Latency over time (ms)",
        Msg::ChartComparativeCaption => {
            "Each line is one host's latency over time. Low, smooth lines mean stability; \
             spikes suggest momentary variation or congestion."
        }
        Msg::ChartBars => "Per-host performance (Ping / Jitter / Loss)",
        Msg::ChartBarsCaption => {
            "Smaller bars are better. Ping drives response time; high jitter breaks up \
             voice/video; loss above 1% causes visible stalls."
        }
        Msg::HistoryTitle => "History panel",
        Msg::HistoryCaption => {
            "Network quality across runs. Rising ping/jitter/loss trends mean degradation; \
             the score summarizes the whole."
        }
        Msg::HistoryEmpty => "No history yet — run more tests to build comparisons.",
        Msg::InterpretTitle => "How to read this",
        Msg::InterpretLoss => "Loss (%): lower is better. Above 1% already causes stutters.",
        Msg::InterpretLatency => {
            "Mean and p95: typical latency and the ceiling for 95% of measurements (lower is better)."
        }
        Msg::InterpretJitter => {
            "Jitter: variation between pings (lower is steadier). High values hurt voice/video."
        }
        Msg::TimeAxis => "Time (s)",
        Msg::GeneratedAt => "Timestamp",
        Msg::Footnote => "© {year} Report generated automatically.",
    }
}
