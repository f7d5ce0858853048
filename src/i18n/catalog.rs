//! Built-in dictionary of the trading dashboard.
//!
//! Each row is `(key, en, ja)`. Keys are the English source strings used by
//! presentation code, so most English values equal their key.

use super::Locale;

pub(crate) const ENTRIES: &[(&str, &str, &str)] = &[
    // Common
    ("FX Trading Synchronization System", "FX Trading Synchronization System", "FX取引同期システム"),
    ("Back to Home", "Back to Home", "ホームに戻る"),
    ("Home", "Home", "ホーム"),
    ("Dashboard", "Dashboard", "ダッシュボード"),
    ("Reports", "Reports", "レポート"),
    ("System Status", "System Status", "システム状態"),
    ("View Status", "View Status", "システム状態を表示"),

    // Home page
    ("Trading Dashboard", "Trading Dashboard", "取引ダッシュボード"),
    (
        "Monitor and manage your FX trading operations in real-time.",
        "Monitor and manage your FX trading operations in real-time.",
        "FX取引操作をリアルタイムで監視・管理します。",
    ),
    ("Go to Dashboard", "Go to Dashboard", "ダッシュボードへ"),
    ("Trading Reports", "Trading Reports", "取引レポート"),
    (
        "View detailed trading reports and analyze performance.",
        "View detailed trading reports and analyze performance.",
        "詳細な取引レポートを表示し、パフォーマンスを分析します。",
    ),
    ("View Reports", "View Reports", "レポートを表示"),
    (
        "Check the status of the FX Trading Synchronization System components.",
        "Check the status of the FX Trading Synchronization System components.",
        "FX取引同期システムコンポーネントの状態を確認します。",
    ),

    // Dashboard page
    ("USD/JPY Chart", "USD/JPY Chart", "USD/JPY チャート"),
    ("Open Positions", "Open Positions", "オープンポジション"),
    ("Buy", "Buy", "買い"),
    ("Sell", "Sell", "売り"),
    ("lot", "lot", "ロット"),
    ("pips", "pips", "pips"),
    ("View All Positions", "View All Positions", "全ポジションを表示"),
    ("Quick Actions", "Quick Actions", "クイックアクション"),
    ("New Order", "New Order", "新規注文"),
    ("Close All Positions", "Close All Positions", "全ポジションを決済"),
    ("Refresh Data", "Refresh Data", "データを更新"),

    // Reports page
    ("Recent Trades", "Recent Trades", "最近の取引"),
    ("Export CSV", "Export CSV", "CSVエクスポート"),
    ("Filter", "Filter", "フィルター"),
    ("ID", "ID", "ID"),
    ("Client", "Client", "クライアント"),
    ("Pair", "Pair", "通貨ペア"),
    ("Direction", "Direction", "方向"),
    ("BUY", "BUY", "買い"),
    ("SELL", "SELL", "売り"),
    ("Lots", "Lots", "ロット数"),
    ("Entry Price", "Entry Price", "エントリー価格"),
    ("Exit Price", "Exit Price", "決済価格"),
    ("P/L (¥)", "P/L (¥)", "損益 (¥)"),
    ("P/L (pips)", "P/L (pips)", "損益 (pips)"),
    ("Open Time", "Open Time", "オープン時間"),
    ("Close Time", "Close Time", "決済時間"),
    ("Status", "Status", "状態"),
    ("OPEN", "OPEN", "オープン"),
    ("CLOSED", "CLOSED", "決済済み"),
    ("Previous", "Previous", "前へ"),
    ("Next", "Next", "次へ"),
    ("Showing", "Showing", "表示中"),
    ("to", "to", "から"),
    ("of", "of", "件中"),
    ("trades", "trades", "取引"),
    ("Performance Summary", "Performance Summary", "パフォーマンス概要"),
    ("Total Trades", "Total Trades", "総取引数"),
    ("Win Rate", "Win Rate", "勝率"),
    ("Total Profit/Loss", "Total Profit/Loss", "総損益"),
    ("Average Trade Profit", "Average Trade Profit", "平均取引利益"),
    ("Currency Pair Performance", "Currency Pair Performance", "通貨ペアパフォーマンス"),
    ("View Detailed Analysis", "View Detailed Analysis", "詳細分析を表示"),

    // Status page
    ("Last updated", "Last updated", "最終更新"),
    ("Refresh", "Refresh", "更新"),
    ("Server Components", "Server Components", "サーバーコンポーネント"),
    ("Name", "Name", "名前"),
    ("Version", "Version", "バージョン"),
    ("Uptime", "Uptime", "稼働時間"),
    ("Last Update", "Last Update", "最終更新"),
    ("Main Terminal", "Main Terminal", "メインターミナル"),
    ("Broker", "Broker", "ブローカー"),
    ("Positions", "Positions", "ポジション"),
    ("Client Terminals", "Client Terminals", "クライアントターミナル"),
    ("Client ID", "Client ID", "クライアントID"),
    ("System Actions", "System Actions", "システムアクション"),
    ("Restart Server", "Restart Server", "サーバーを再起動"),
    ("Restart Main Terminal", "Restart Main Terminal", "メインターミナルを再起動"),
    ("Restart All Clients", "Restart All Clients", "全クライアントを再起動"),
    ("Main Server", "Main Server", "メインサーバー"),
    ("GMO Client", "GMO Client", "GMOクライアント"),
    ("Gaitame Client", "Gaitame Client", "ゲイタメクライアント"),
    ("Test Client", "Test Client", "テストクライアント"),
    ("online", "online", "オンライン"),
    ("offline", "offline", "オフライン"),
    ("warning", "warning", "警告"),

    // Language switcher
    ("English", "English", "English"),
    ("Japanese", "日本語", "日本語"),
    ("Language", "Language", "言語"),
];

/// Iterate the built-in `(key, value)` pairs for one locale
pub(crate) fn entries_for(locale: Locale) -> impl Iterator<Item = (&'static str, &'static str)> {
    ENTRIES.iter().map(move |&(key, en, ja)| match locale {
        Locale::En => (key, en),
        Locale::Ja => (key, ja),
    })
}
