use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "vacstat",
    version,
    about = "Запросы и статистика по CSV-выгрузке вакансий"
)]
pub struct Cli {
    /// Путь к файлу с вакансиями
    #[arg(short, long)]
    pub input: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Вывести вакансии таблицей с фильтрацией и сортировкой
    Table {
        /// Параметр фильтрации, "<Поле>: <значение>"
        #[arg(long, default_value = "")]
        filter: String,

        /// Параметр сортировки (название поля)
        #[arg(long, default_value = "")]
        sort: String,

        /// Обратный порядок сортировки: Да / Нет
        #[arg(long, default_value = "")]
        reverse: String,

        /// Диапазон вывода, номера строк "от до" (1-based)
        #[arg(long, default_value = "")]
        range: String,

        /// Требуемые столбцы, через запятую
        #[arg(long, default_value = "")]
        columns: String,
    },

    /// Посчитать статистику по годам и регионам
    Stats {
        /// Название профессии для профильных рядов
        #[arg(long, default_value = "")]
        profession: String,

        /// Считать годовые ряды параллельно по партициям
        #[arg(long)]
        parallel: bool,

        /// Записать отчёт в JSON-файл
        #[arg(long)]
        out: Option<PathBuf>,
    },
}
