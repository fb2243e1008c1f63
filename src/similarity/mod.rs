/// 상품 설명 유사도 검사
/// 1. 레벤슈타인 편집 거리 계산
/// 2. 근접 중복 설명 판정

/// 두 문자열 사이의 레벤슈타인 거리 계산
/// (문자 단위 삽입/삭제/치환의 최소 횟수)
pub fn levenshtein(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let rows = a.len() + 1;
    let cols = b.len() + 1;

    // (len(a)+1) x (len(b)+1) 비용 행렬
    let mut cost = vec![0usize; rows * cols];
    for i in 0..rows {
        cost[i * cols] = i;
    }
    for j in 0..cols {
        cost[j] = j;
    }

    for i in 1..rows {
        for j in 1..cols {
            let substitution = if a[i - 1] == b[j - 1] { 0 } else { 1 };
            let delete = cost[(i - 1) * cols + j] + 1;
            let insert = cost[i * cols + (j - 1)] + 1;
            let replace = cost[(i - 1) * cols + (j - 1)] + substitution;
            cost[i * cols + j] = delete.min(insert).min(replace);
        }
    }

    cost[rows * cols - 1]
}

/// 근접 중복 판정: 편집 거리가 후보 설명 길이의 1/3 미만이면 중복으로 본다
pub fn near_duplicate(candidate: &str, existing: &str) -> bool {
    levenshtein(candidate, existing) < candidate.chars().count() / 3
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance_empty_strings() {
        assert_eq!(levenshtein("", ""), 0);
        assert_eq!(levenshtein("", "auction"), 7);
        assert_eq!(levenshtein("auction", ""), 7);
    }

    #[test]
    fn test_distance_identical() {
        assert_eq!(levenshtein("bidder", "bidder"), 0);
        assert_eq!(levenshtein("경매 상품", "경매 상품"), 0);
    }

    #[test]
    fn test_distance_known_values() {
        assert_eq!(levenshtein("haha", "hihi"), 2);
        assert_eq!(levenshtein("apals", "tgdbr2"), 6);
    }

    #[test]
    fn test_distance_symmetry() {
        let samples = [("haha", "hihi"), ("apals", "tgdbr2"), ("", "x"), ("kitten", "sitting")];
        for (a, b) in samples {
            assert_eq!(levenshtein(a, b), levenshtein(b, a));
        }
    }

    #[test]
    fn test_distance_counts_chars_not_bytes() {
        // 다 바이트 문자도 한 글자로 취급
        assert_eq!(levenshtein("가나다", "가나라"), 1);
    }

    #[test]
    fn test_near_duplicate_threshold() {
        // 길이 30, 거리 2 -> 2 < 10 이므로 중복
        let original = "vintage film camera from 1972.";
        let retouched = "vintage film camera from 1985.";
        assert_eq!(original.chars().count(), 30);
        assert!(near_duplicate(retouched, original));

        // 거리가 길이의 1/3 이상이면 중복 아님
        let different = "hand carved oak chess set, new";
        assert!(!near_duplicate(different, original));
    }

    #[test]
    fn test_near_duplicate_short_candidate() {
        // 길이 3 미만이면 임계값이 0이 되어 절대 중복이 아니다
        assert!(!near_duplicate("", ""));
        assert!(!near_duplicate("ab", "ab"));
    }
}
