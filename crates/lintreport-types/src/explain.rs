//! Explain registry for flake8 rule codes.
//!
//! Maps a rule code to a short description and remediation line, both in the report language.

use crate::SeverityBucket;

/// Explanation entry for a rule code.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RuleExplanation {
    pub code: &'static str,
    /// Short description used in the distribution table.
    pub description: &'static str,
    /// How to fix violations.
    pub remediation: &'static str,
}

const fn rule(
    code: &'static str,
    description: &'static str,
    remediation: &'static str,
) -> RuleExplanation {
    RuleExplanation {
        code,
        description,
        remediation,
    }
}

// Sorted by code.
const RULES: &[RuleExplanation] = &[
    rule("C901", "Слишком высокая цикломатическая сложность", "Разбить функцию на более мелкие части"),
    rule("E111", "Отступ не кратен четырем", "Использовать отступы по 4 пробела"),
    rule("E114", "Отступ комментария не кратен четырем", "Выровнять комментарий по 4 пробела"),
    rule("E115", "Ожидался отступ у комментария", "Добавить отступ комментарию внутри блока"),
    rule("E116", "Неожиданный отступ у комментария", "Убрать лишний отступ у комментария"),
    rule("E117", "Избыточный отступ", "Уменьшить отступ блока"),
    rule("E121", "Строка продолжения с недостаточным висячим отступом", "Выровнять висячий отступ"),
    rule("E122", "Строка продолжения без отступа или с отступом меньше нужного", "Добавить отступ строке продолжения"),
    rule("E124", "Закрывающая скобка не совпадает с визуальным отступом", "Выровнять закрывающую скобку"),
    rule("E125", "Строка продолжения с тем же отступом, что и следующая логическая строка", "Добавить дополнительный отступ строке продолжения"),
    rule("E126", "Строка продолжения с избыточным висячим отступом", "Уменьшить висячий отступ"),
    rule("E127", "Строка продолжения с избыточным отступом для визуального выравнивания", "Выровнять строку продолжения по открывающей скобке"),
    rule("E128", "Строка продолжения с недостаточным отступом для визуального выравнивания", "Выровнять строку продолжения по открывающей скобке"),
    rule("E129", "Визуально выровненная строка с тем же отступом, что и следующая логическая строка", "Добавить отступ условию или вынести его в переменную"),
    rule("E131", "Строка продолжения не выровнена для висячего отступа", "Выровнять строки продолжения"),
    rule("E201", "Пробел после открывающей скобки", "Удалить пробел после скобки"),
    rule("E202", "Пробел перед закрывающей скобкой", "Удалить пробел перед скобкой"),
    rule("E203", "Пробел перед двоеточием, запятой или точкой с запятой", "Удалить пробел перед знаком препинания"),
    rule("E211", "Пробел перед скобкой", "Удалить пробел перед скобкой"),
    rule("E221", "Несколько пробелов перед оператором", "Оставить один пробел перед оператором"),
    rule("E222", "Несколько пробелов после оператора", "Оставить один пробел после оператора"),
    rule("E225", "Отсутствует пробел вокруг оператора", "Добавить пробелы вокруг оператора"),
    rule("E226", "Отсутствует пробел вокруг арифметического оператора", "Добавить пробелы вокруг оператора"),
    rule("E228", "Отсутствует пробел вокруг оператора остатка от деления", "Добавить пробелы вокруг оператора"),
    rule("E231", "Отсутствует пробел после запятой или двоеточия", "Добавить пробел после знака препинания"),
    rule("E251", "Пробелы вокруг знака равенства в именованном аргументе", "Удалить пробелы вокруг '=' в аргументах"),
    rule("E261", "Перед встроенным комментарием нужно минимум два пробела", "Поставить два пробела перед '#'"),
    rule("E262", "Встроенный комментарий должен начинаться с '# '", "Добавить пробел после '#'"),
    rule("E265", "Блочный комментарий должен начинаться с '# '", "Добавить пробел после '#'"),
    rule("E266", "Слишком много '#' в начале блочного комментария", "Оставить один символ '#'"),
    rule("E271", "Несколько пробелов после ключевого слова", "Оставить один пробел после ключевого слова"),
    rule("E301", "Ожидалась 1 пустая строка", "Добавить пустую строку перед методом"),
    rule("E302", "Ожидалось 2 пустые строки", "Добавить 2 пустые строки перед функциями и классами"),
    rule("E303", "Слишком много пустых строк", "Удалить лишние пустые строки"),
    rule("E305", "Ожидалось 2 пустые строки после определения класса или функции", "Добавить 2 пустые строки после определения"),
    rule("E306", "Ожидалась 1 пустая строка перед вложенным определением", "Добавить пустую строку перед вложенным определением"),
    rule("E401", "Несколько импортов в одной строке", "Разнести импорты по отдельным строкам"),
    rule("E402", "Импорт модуля не в начале файла", "Перенести импорты в начало файла"),
    rule("E501", "Строка слишком длинная", "Разбить длинные строки или настроить форматтер"),
    rule("E701", "Несколько операторов в одной строке (двоеточие)", "Перенести тело блока на новую строку"),
    rule("E702", "Несколько операторов в одной строке (точка с запятой)", "Разнести операторы по строкам"),
    rule("E704", "Определение функции и тело в одной строке", "Перенести тело функции на новую строку"),
    rule("E711", "Сравнение с None через '=='", "Использовать 'is None' / 'is not None'"),
    rule("E712", "Сравнение с True/False через '=='", "Использовать проверку истинности или 'is'"),
    rule("E713", "Проверка членства должна быть 'not in'", "Заменить 'not x in y' на 'x not in y'"),
    rule("E714", "Проверка идентичности должна быть 'is not'", "Заменить 'not x is y' на 'x is not y'"),
    rule("E721", "Сравнение типов через '=='", "Использовать isinstance()"),
    rule("E722", "Голый 'except'", "Указать конкретные типы исключений"),
    rule("E731", "Присваивание lambda-выражения", "Заменить lambda на def"),
    rule("E741", "Неоднозначное имя переменной", "Переименовать переменные 'l', 'O', 'I'"),
    rule("E999", "Синтаксическая ошибка", "Исправить синтаксис файла"),
    rule("F401", "Модуль импортирован, но не используется", "Удалить неиспользуемые импорты"),
    rule("F403", "Использован 'from module import *'", "Импортировать имена явно"),
    rule("F405", "Имя может быть не определено или импортировано через '*'", "Импортировать имена явно"),
    rule("F541", "f-строка без плейсхолдеров", "Убрать префикс f у строк без плейсхолдеров"),
    rule("F632", "Сравнение с литералом через 'is'", "Использовать '==' для сравнения с литералами"),
    rule("F811", "Повторное определение неиспользуемого имени", "Удалить или переименовать дублирующее определение"),
    rule("F821", "Неопределенное имя", "Определить или импортировать используемое имя"),
    rule("F841", "Локальная переменная присвоена, но не используется", "Удалить неиспользуемые переменные"),
    rule("W291", "Пробелы в конце строки", "Удалить пробелы в конце строк"),
    rule("W292", "Нет перевода строки в конце файла", "Добавить перевод строки в конец файла"),
    rule("W293", "Пустая строка содержит пробелы", "Удалить пробелы в пустых строках"),
    rule("W391", "Пустая строка в конце файла", "Удалить пустые строки в конце файла"),
    rule("W503", "Перенос строки перед бинарным оператором", "Перенести оператор в конец предыдущей строки"),
    rule("W504", "Перенос строки после бинарного оператора", "Перенести оператор в начало следующей строки"),
    rule("W605", "Недопустимая escape-последовательность", "Использовать raw-строку или экранировать '\\'"),
];

/// Look up an explanation by rule code.
///
/// Returns `None` if the code is not recognized.
pub fn lookup_rule(code: &str) -> Option<RuleExplanation> {
    RULES
        .binary_search_by(|r| r.code.cmp(code))
        .ok()
        .map(|i| RULES[i])
}

/// List all codes known to the registry, sorted.
pub fn all_codes() -> impl Iterator<Item = &'static str> {
    RULES.iter().map(|r| r.code)
}

/// Fallback remediation for codes the registry does not know.
pub fn generic_remediation(bucket: SeverityBucket) -> &'static str {
    match bucket {
        SeverityBucket::Critical => "Исправить вручную: ошибка может влиять на поведение кода",
        SeverityBucket::Important => "Исправить при ближайшем рефакторинге",
        SeverityBucket::Cosmetic => "Исправить автоматически форматтером (black, autopep8)",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_is_sorted_and_unique() {
        for pair in RULES.windows(2) {
            assert!(
                pair[0].code < pair[1].code,
                "{} must sort before {}",
                pair[0].code,
                pair[1].code
            );
        }
    }

    #[test]
    fn lookup_known_codes() {
        for code in ["F401", "F541", "E302", "E501", "W293", "W292"] {
            let exp = lookup_rule(code).expect("known code");
            assert_eq!(exp.code, code);
            assert!(!exp.description.is_empty());
            assert!(!exp.remediation.is_empty());
        }
    }

    #[test]
    fn lookup_unknown_returns_none() {
        assert!(lookup_rule("X999").is_none());
        assert!(lookup_rule("").is_none());
    }

    #[test]
    fn every_listed_code_resolves() {
        for code in all_codes() {
            assert!(lookup_rule(code).is_some(), "code {code} should resolve");
        }
    }
}
